//! Closing-tag synthesis when `>` completes an opening tag name.
//!
//! Matching is textual: it fires only when the cursor sits directly after
//! `<` plus a bare alphanumeric tag name. Attributes or whitespace between
//! the tag name and the cursor (`<div class="x"`) do not trigger it, and
//! neither does a closing tag (`</div`).

use crate::buffer::RopeBuffer;
use regex::Regex;
use std::sync::LazyLock;

/// Char that triggers auto-closing.
pub const TRIGGER: char = '>';

static OPEN_TAG_BEFORE_CURSOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z0-9]+)$").expect("static regex"));

/// Edit that replaces the default `>` insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagCompletion {
    pub tag: String,
    /// Text to insert at the cursor: `>` followed by `</tag>`.
    pub insert: String,
    /// Cursor advance in chars from the insertion point (just past `>`).
    pub cursor_advance: usize,
}

/// Tag name of an opening tag that ends exactly at `cursor`.
pub fn open_tag_before(buffer: &RopeBuffer, cursor: usize) -> Option<String> {
    let cursor = cursor.min(buffer.len_chars());
    // `<` and the tag name cannot span a newline, so the current line suffices.
    let (line, _) = buffer.char_to_line_col(cursor);
    let line_start = buffer.line_col_to_char(line, 0);
    let before = buffer.slice_chars(line_start..cursor);
    OPEN_TAG_BEFORE_CURSOR
        .captures(&before)
        .and_then(|caps| caps.get(1))
        .map(|tag| tag.as_str().to_string())
}

/// Closing-tag edit for inserting `typed` at `cursor`.
///
/// # Returns
/// `None` when `typed` is not `>` or no opening tag ends at the cursor; the
/// caller then inserts the char as usual.
pub fn complete_tag(buffer: &RopeBuffer, cursor: usize, typed: char) -> Option<TagCompletion> {
    if typed != TRIGGER {
        return None;
    }
    let tag = open_tag_before(buffer, cursor)?;
    Some(TagCompletion {
        insert: format!("{}</{}>", TRIGGER, tag),
        cursor_advance: 1,
        tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str, cursor: usize, typed: char) -> (String, usize) {
        let mut buffer = RopeBuffer::new(text);
        match complete_tag(&buffer, cursor, typed) {
            Some(completion) => {
                buffer.insert_text(cursor, &completion.insert);
                (buffer.text(), cursor + completion.cursor_advance)
            }
            None => {
                buffer.insert_text(cursor, &typed.to_string());
                (buffer.text(), cursor + 1)
            }
        }
    }

    #[test]
    fn closes_bare_opening_tag() {
        assert_eq!(apply("<div", 4, '>'), ("<div></div>".to_string(), 5));
    }

    #[test]
    fn closing_tag_gets_plain_insertion() {
        assert_eq!(apply("</div", 5, '>'), ("</div>".to_string(), 6));
    }

    #[test]
    fn attributes_do_not_trigger() {
        let text = "<div class=\"x\"";
        assert_eq!(
            apply(text, 14, '>'),
            ("<div class=\"x\">".to_string(), 15)
        );
    }

    #[test]
    fn only_text_before_cursor_counts() {
        assert_eq!(
            apply("<h1 x", 3, '>'),
            ("<h1></h1> x".to_string(), 4)
        );
        assert_eq!(apply("<", 1, '>'), ("<>".to_string(), 2));
    }

    #[test]
    fn tag_on_later_line_and_mixed_case() {
        assert_eq!(
            apply("<div>\n  <Span", 13, '>'),
            ("<div>\n  <Span></Span>".to_string(), 14)
        );
    }

    #[test]
    fn non_trigger_chars_pass_through() {
        let buffer = RopeBuffer::new("<div");
        assert_eq!(complete_tag(&buffer, 4, 'x'), None);
    }
}
