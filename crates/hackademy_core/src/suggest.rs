//! Ranked completion candidates for a partial word.

use crate::constants::MAX_SUGGESTIONS;
use crate::vocabulary::{Vocabulary, VocabularyEntry};

/// Entries whose lowercase form starts with the lowercase `word`, excluding an
/// exact (case-insensitive) match, in vocabulary order, capped at
/// [`MAX_SUGGESTIONS`].
///
/// An empty `word` yields no candidates.
pub fn suggest<'a>(word: &str, vocabulary: &'a Vocabulary) -> Vec<&'a VocabularyEntry> {
    if word.is_empty() {
        return Vec::new();
    }
    let folded = word.to_ascii_lowercase();
    vocabulary
        .iter()
        .filter(|entry| entry.folded().starts_with(&folded) && entry.folded() != folded)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Same as [`suggest`] but returning owned tokens.
pub fn suggest_tokens(word: &str, vocabulary: &Vocabulary) -> Vec<String> {
    suggest(word, vocabulary)
        .into_iter()
        .map(|entry| entry.token().to_string())
        .collect()
}
