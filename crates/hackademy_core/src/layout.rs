//! Popup anchor projection from text-layout metrics.
//!
//! The editor surface is monospaced with a fixed line height, so the caret's
//! pixel position follows from its line and column alone. A host rendering
//! with a proportional font should implement [`AnchorProjector`] against real
//! glyph measurements instead.

use crate::buffer::RopeBuffer;
use crate::constants::{
    DEFAULT_CHAR_WIDTH, DEFAULT_GUTTER_WIDTH, DEFAULT_LINE_HEIGHT, DEFAULT_PADDING_LEFT,
    DEFAULT_PADDING_TOP,
};
use serde::{Deserialize, Serialize};

/// Fixed layout constants of the editor surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorMetrics {
    pub line_height: f32,
    pub padding_top: f32,
    pub padding_left: f32,
    /// Width reserved for line numbers and their margin.
    pub gutter_width: f32,
    /// Average glyph advance.
    pub char_width: f32,
}

impl Default for EditorMetrics {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
            padding_top: DEFAULT_PADDING_TOP,
            padding_left: DEFAULT_PADDING_LEFT,
            gutter_width: DEFAULT_GUTTER_WIDTH,
            char_width: DEFAULT_CHAR_WIDTH,
        }
    }
}

/// Scroll position of an editor surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub top: f32,
    pub left: f32,
}

impl ScrollOffset {
    pub fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }
}

/// Top-left corner of the suggestion popup. Both coordinates are `>= 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PopupAnchor {
    pub top: f32,
    pub left: f32,
}

impl PopupAnchor {
    /// Build an anchor, clamping negative (or NaN) coordinates to the edge.
    pub fn clamped(top: f32, left: f32) -> Self {
        Self {
            top: top.max(0.0),
            left: left.max(0.0),
        }
    }
}

/// Maps a caret position to the pixel anchor of the popup below it.
pub trait AnchorProjector: Send {
    fn project(&self, buffer: &RopeBuffer, cursor: usize, scroll: ScrollOffset) -> PopupAnchor;
}

/// Arithmetic projector for monospaced surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MonospaceProjector {
    pub metrics: EditorMetrics,
}

impl MonospaceProjector {
    pub fn new(metrics: EditorMetrics) -> Self {
        Self { metrics }
    }
}

impl AnchorProjector for MonospaceProjector {
    fn project(&self, buffer: &RopeBuffer, cursor: usize, scroll: ScrollOffset) -> PopupAnchor {
        project(buffer, cursor, scroll, &self.metrics)
    }
}

/// Anchor the popup one line below the caret.
///
/// `top = padding_top + (line + 1) * line_height - scroll.top` and
/// `left = padding_left + gutter_width + column * char_width - scroll.left`,
/// where `line` counts the `\n` chars before `cursor` and `column` counts the
/// chars after the last of them.
pub fn project(
    buffer: &RopeBuffer,
    cursor: usize,
    scroll: ScrollOffset,
    metrics: &EditorMetrics,
) -> PopupAnchor {
    let (line, column) = buffer.char_to_line_col(cursor);
    let top = metrics.padding_top + (line as f32 + 1.0) * metrics.line_height - scroll.top;
    let left = metrics.padding_left + metrics.gutter_width + column as f32 * metrics.char_width
        - scroll.left;
    PopupAnchor::clamped(top, left)
}

/// Scroll state of the input surface mirrored onto the display surface that
/// paints line numbers and text underneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSync {
    input: ScrollOffset,
    display: ScrollOffset,
}

impl ScrollSync {
    /// Record a new input-surface scroll position and mirror it.
    pub fn sync(&mut self, offset: ScrollOffset) {
        self.input = offset;
        self.display = offset;
    }

    pub fn input(&self) -> ScrollOffset {
        self.input
    }

    pub fn display(&self) -> ScrollOffset {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(text: &str, cursor: usize, scroll: ScrollOffset) -> PopupAnchor {
        project(
            &RopeBuffer::new(text),
            cursor,
            scroll,
            &EditorMetrics::default(),
        )
    }

    #[test]
    fn first_line_sits_one_line_below_padding() {
        let a = anchor("div", 3, ScrollOffset::default());
        assert_eq!(a.top, 40.0);
        assert_eq!(a.left, 16.0 + 48.0 + 3.0 * 8.5);
    }

    #[test]
    fn counts_lines_and_trailing_column() {
        let a = anchor("<div>\n  <sp", 11, ScrollOffset::default());
        assert_eq!(a.top, 16.0 + 2.0 * 24.0);
        assert_eq!(a.left, 64.0 + 5.0 * 8.5);
    }

    #[test]
    fn subtracts_scroll_offsets() {
        let a = anchor("a\nb\nc", 5, ScrollOffset::new(30.0, 4.0));
        assert_eq!(a.top, 16.0 + 3.0 * 24.0 - 30.0);
        assert_eq!(a.left, 64.0 + 8.5 - 4.0);
    }

    #[test]
    fn clamps_to_top_left_edge() {
        let a = anchor("abc", 3, ScrollOffset::new(500.0, 500.0));
        assert_eq!(a, PopupAnchor { top: 0.0, left: 0.0 });
    }

    #[test]
    fn scroll_sync_mirrors_input_into_display() {
        let mut sync = ScrollSync::default();
        sync.sync(ScrollOffset::new(12.0, 3.0));
        assert_eq!(sync.display(), sync.input());
        assert_eq!(sync.display(), ScrollOffset::new(12.0, 3.0));
    }
}
