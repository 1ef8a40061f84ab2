//! Shared constants used across Hackademy crates.

/// Upper bound on entries shown in the suggestion popup.
pub const MAX_SUGGESTIONS: usize = 8;

/// Default editor line height in pixels.
pub const DEFAULT_LINE_HEIGHT: f32 = 24.0;
/// Default padding between the editor's top edge and the first line.
pub const DEFAULT_PADDING_TOP: f32 = 16.0;
/// Default padding between the editor's left edge and the gutter.
pub const DEFAULT_PADDING_LEFT: f32 = 16.0;
/// Line-number column (32px) plus its right margin (16px).
pub const DEFAULT_GUTTER_WIDTH: f32 = 48.0;
/// Approximate advance of one monospace glyph at the editor font size.
pub const DEFAULT_CHAR_WIDTH: f32 = 8.5;

/// Grace period between focus loss and popup dismissal, in milliseconds.
pub const DEFAULT_DISMISS_DELAY_MS: u64 = 200;

/// Text inserted by Tab when no popup consumes it (tab size 2).
pub const TAB_INSERT: &str = "  ";

/// Default mentor model identifier.
pub const DEFAULT_MENTOR_MODEL: &str = "gemini-2.5-flash";
/// Default base URL for the mentor API.
pub const DEFAULT_MENTOR_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
