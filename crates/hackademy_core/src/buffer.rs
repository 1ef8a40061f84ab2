//! Rope-backed text storage for the edit session.
//!
//! All offsets are char indices. Line breaks are `\n` only (ropey is built
//! without CR/Unicode line-break support), so a line index is exactly the
//! number of `\n` characters before an offset.

use ropey::Rope;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

/// Summary of a single buffer mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditDelta {
    /// First char index touched by the edit.
    pub start: usize,
    /// Number of chars removed at `start`.
    pub removed: usize,
    /// Number of chars inserted at `start`.
    pub inserted: usize,
}

/// Immutable view of the buffer at one revision.
///
/// Cloning a rope is O(1) and shares storage, so later edits to the live
/// buffer never show through a snapshot the host already holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BufferSnapshot {
    rope: Rope,
    revision: u64,
}

impl BufferSnapshot {
    /// Revision this snapshot was taken at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Content length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of display lines (an empty buffer has one).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Owned UTF-8 copy of the content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl fmt::Display for BufferSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rope, f)
    }
}

impl Serialize for BufferSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.rope)
    }
}

/// Rope-backed content buffer owned by the edit session.
#[derive(Clone, Debug, Default)]
pub struct RopeBuffer {
    rope: Rope,
    revision: u64,
}

impl RopeBuffer {
    /// Create a new buffer from UTF-8 text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            revision: 0,
        }
    }

    /// Returns a borrowed rope handle.
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Returns the current revision of the buffer.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the content length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines in the rope.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Returns a UTF-8 copy of the whole buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Capture the current content as an immutable snapshot.
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            rope: self.rope.clone(),
            revision: self.revision,
        }
    }

    /// Replace the full buffer text.
    ///
    /// The revision still advances so snapshots from before the reset compare
    /// as stale.
    pub fn reset(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Convert a char index into `(line, column)`; the column counts every
    /// char after the preceding `\n`.
    pub fn char_to_line_col(&self, char_index: usize) -> (usize, usize) {
        let clamped = char_index.min(self.len_chars());
        let line = self.rope.char_to_line(clamped);
        (line, clamped - self.rope.line_to_char(line))
    }

    /// Convert `(line, column)` into a char index, clamping to the line end.
    pub fn line_col_to_char(&self, line: usize, column: usize) -> usize {
        if line >= self.line_count() {
            return self.len_chars();
        }
        self.rope.line_to_char(line) + column.min(self.line_len_chars(line))
    }

    /// Returns the char length of a line without its trailing `\n`.
    pub fn line_len_chars(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Returns a UTF-8 copy of the given char range.
    pub fn slice_chars(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Returns the char immediately before `char_index`, if any.
    pub fn char_before(&self, char_index: usize) -> Option<char> {
        let clamped = char_index.min(self.len_chars());
        if clamped == 0 {
            None
        } else {
            Some(self.rope.char(clamped - 1))
        }
    }

    /// Insert text at the given char position.
    pub fn insert_text(&mut self, char_index: usize, text: &str) -> Option<EditDelta> {
        self.replace_char_range(char_index..char_index, text)
    }

    /// Delete a char range.
    pub fn delete_char_range(&mut self, range: Range<usize>) -> Option<EditDelta> {
        self.replace_char_range(range, "")
    }

    /// Replace a char range with new text.
    ///
    /// # Returns
    /// `None` when the edit is a no-op, otherwise the applied delta.
    pub fn replace_char_range(&mut self, range: Range<usize>, text: &str) -> Option<EditDelta> {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start > end || (start == end && text.is_empty()) {
            return None;
        }
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        self.revision = self.revision.wrapping_add(1);
        Some(EditDelta {
            start,
            removed: end - start,
            inserted: text.chars().count(),
        })
    }
}
