//! Fixed table of completable tokens.
//!
//! The table is ordered: suggestions surface in registration order, so the
//! first entry registered for a prefix is the first one shown. Entries are
//! deduplicated case-insensitively, keeping the first registration.

use crate::error::CoreError;
use crate::token::is_token_char;
use serde::Serialize;
use std::collections::HashSet;

/// Authoring-time grouping of a token. Never consulted when matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    Tag,
    Keyword,
    Property,
    Attribute,
    UtilityClass,
}

impl TokenCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenCategory::Tag => "tag",
            TokenCategory::Keyword => "keyword",
            TokenCategory::Property => "property",
            TokenCategory::Attribute => "attribute",
            TokenCategory::UtilityClass => "utility-class",
        }
    }
}

/// One completable token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VocabularyEntry {
    token: String,
    #[serde(skip)]
    folded: String,
    category: TokenCategory,
}

impl VocabularyEntry {
    /// The token as it is inserted.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Authoring category.
    pub fn category(&self) -> TokenCategory {
        self.category
    }

    pub(crate) fn folded(&self) -> &str {
        &self.folded
    }
}

/// Ordered, deduplicated token table injected into an edit session.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    /// Build a table from `(token, category)` pairs in display order.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidToken`] when a token is empty or contains a
    /// char outside `[A-Za-z0-9-]`, since such a token could never be matched
    /// by a partial word.
    pub fn new<I, S>(tokens: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (S, TokenCategory)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        for (token, category) in tokens {
            let token = token.into();
            if token.is_empty() {
                return Err(CoreError::InvalidToken {
                    token,
                    reason: "empty",
                });
            }
            if !token.chars().all(is_token_char) {
                return Err(CoreError::InvalidToken {
                    token,
                    reason: "only ASCII letters, digits and '-' are completable",
                });
            }
            let folded = token.to_ascii_lowercase();
            if seen.insert(folded.clone()) {
                entries.push(VocabularyEntry {
                    token,
                    folded,
                    category,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Build a table of uncategorised tokens (tagged as keywords).
    ///
    /// # Errors
    /// Same as [`Vocabulary::new`].
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            tokens
                .into_iter()
                .map(|token| (token, TokenCategory::Keyword)),
        )
    }

    /// The built-in HTML / React / CSS / Tailwind table.
    pub fn builtin() -> Self {
        let mut entries = Vec::with_capacity(BUILTIN.len());
        let mut seen = HashSet::new();
        for (token, category) in BUILTIN {
            let folded = token.to_ascii_lowercase();
            if seen.insert(folded.clone()) {
                entries.push(VocabularyEntry {
                    token: (*token).to_string(),
                    folded,
                    category: *category,
                });
            }
        }
        Self { entries }
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.iter()
    }

    /// Case-insensitive exact lookup.
    pub fn get(&self, token: &str) -> Option<&VocabularyEntry> {
        let folded = token.to_ascii_lowercase();
        self.entries.iter().find(|entry| entry.folded == folded)
    }
}

use TokenCategory::{Attribute, Keyword, Property, Tag, UtilityClass};

const BUILTIN: &[(&str, TokenCategory)] = &[
    ("div", Tag),
    ("p", Tag),
    ("h1", Tag),
    ("h2", Tag),
    ("h3", Tag),
    ("span", Tag),
    ("button", Tag),
    ("img", Tag),
    ("input", Tag),
    ("form", Tag),
    ("ul", Tag),
    ("li", Tag),
    ("section", Tag),
    ("header", Tag),
    ("footer", Tag),
    ("a", Tag),
    ("nav", Tag),
    ("main", Tag),
    ("import", Keyword),
    ("export", Keyword),
    ("return", Keyword),
    ("const", Keyword),
    ("function", Keyword),
    ("default", Keyword),
    ("useState", Keyword),
    ("useEffect", Keyword),
    ("console", Keyword),
    ("log", Keyword),
    ("map", Keyword),
    ("onClick", Keyword),
    ("onChange", Keyword),
    ("onSubmit", Keyword),
    ("color", Property),
    ("cursor", Property),
    ("content", Property),
    ("columns", Property),
    ("clear", Property),
    ("clip", Property),
    ("background", Property),
    ("border", Property),
    ("margin", Property),
    ("padding", Property),
    ("width", Property),
    ("height", Property),
    ("font-size", Property),
    ("display", Property),
    ("position", Property),
    ("top", Property),
    ("left", Property),
    ("flex", Property),
    ("grid", Property),
    ("className", Attribute),
    ("src", Attribute),
    ("alt", Attribute),
    ("href", Attribute),
    ("type", Attribute),
    ("placeholder", Attribute),
    ("value", Attribute),
    ("key", Attribute),
    ("id", Attribute),
    ("flex", UtilityClass),
    ("items-center", UtilityClass),
    ("justify-center", UtilityClass),
    ("flex-col", UtilityClass),
    ("grid", UtilityClass),
    ("hidden", UtilityClass),
    ("block", UtilityClass),
    ("bg-white", UtilityClass),
    ("bg-black", UtilityClass),
    ("bg-gray-100", UtilityClass),
    ("bg-blue-500", UtilityClass),
    ("bg-red-500", UtilityClass),
    ("bg-green-500", UtilityClass),
    ("bg-indigo-600", UtilityClass),
    ("bg-yellow-400", UtilityClass),
    ("text-white", UtilityClass),
    ("text-black", UtilityClass),
    ("text-gray-500", UtilityClass),
    ("text-center", UtilityClass),
    ("text-xl", UtilityClass),
    ("text-2xl", UtilityClass),
    ("text-sm", UtilityClass),
    ("text-lg", UtilityClass),
    ("font-bold", UtilityClass),
    ("p-2", UtilityClass),
    ("p-4", UtilityClass),
    ("p-6", UtilityClass),
    ("p-8", UtilityClass),
    ("px-4", UtilityClass),
    ("py-2", UtilityClass),
    ("m-2", UtilityClass),
    ("m-4", UtilityClass),
    ("mb-4", UtilityClass),
    ("mt-4", UtilityClass),
    ("mx-auto", UtilityClass),
    ("rounded", UtilityClass),
    ("rounded-lg", UtilityClass),
    ("rounded-xl", UtilityClass),
    ("rounded-full", UtilityClass),
    ("shadow", UtilityClass),
    ("shadow-lg", UtilityClass),
    ("shadow-md", UtilityClass),
    ("border", UtilityClass),
    ("border-gray-300", UtilityClass),
    ("w-full", UtilityClass),
    ("h-screen", UtilityClass),
    ("h-full", UtilityClass),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid_and_deduplicated() {
        let checked = Vocabulary::new(BUILTIN.iter().copied()).expect("builtin tokens are valid");
        let builtin = Vocabulary::builtin();
        assert_eq!(checked.len(), builtin.len());
        assert!(builtin.len() < BUILTIN.len());
        let flex: Vec<_> = builtin.iter().filter(|e| e.token() == "flex").collect();
        assert_eq!(flex.len(), 1);
        assert_eq!(flex[0].category(), TokenCategory::Property);
    }

    #[test]
    fn dedup_is_case_insensitive_and_keeps_first() {
        let vocab = Vocabulary::from_tokens(["onClick", "onclick", "div"]).expect("vocab");
        let tokens: Vec<&str> = vocab.iter().map(VocabularyEntry::token).collect();
        assert_eq!(tokens, vec!["onClick", "div"]);
        assert_eq!(vocab.get("ONCLICK").map(VocabularyEntry::token), Some("onClick"));
    }

    #[test]
    fn rejects_tokens_the_locator_cannot_produce() {
        assert!(matches!(
            Vocabulary::from_tokens([""]),
            Err(CoreError::InvalidToken { reason: "empty", .. })
        ));
        assert!(matches!(
            Vocabulary::from_tokens(["my_var"]),
            Err(CoreError::InvalidToken { .. })
        ));
    }
}
