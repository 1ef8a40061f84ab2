//! Partial-word detection immediately before the cursor.

use crate::buffer::RopeBuffer;

/// Chars that make up a completion token. Hyphens are included so utility
/// class names such as `bg-blue-500` complete as one unit.
pub fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-'
}

/// The partial word being typed and where it starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenContext {
    pub word: String,
    /// Char offset of the first char of `word`.
    pub start: usize,
}

impl TokenContext {
    /// Length of the word in chars.
    pub fn len_chars(&self) -> usize {
        self.word.chars().count()
    }
}

/// Scan backwards from `cursor` over token chars.
///
/// # Returns
/// `None` when the cursor is at the buffer start or the char before it is not
/// a token char.
pub fn locate(buffer: &RopeBuffer, cursor: usize) -> Option<TokenContext> {
    let cursor = cursor.min(buffer.len_chars());
    let mut chars = buffer.rope().chars_at(cursor);
    let mut start = cursor;
    while let Some(ch) = chars.prev() {
        if !is_token_char(ch) {
            break;
        }
        start -= 1;
    }
    if start == cursor {
        return None;
    }
    Some(TokenContext {
        word: buffer.slice_chars(start..cursor),
        start,
    })
}
