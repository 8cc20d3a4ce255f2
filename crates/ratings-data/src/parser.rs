//! Extraction of the group key and ratings from a validated line.

use ratings_core::models::{ParsedRecord, CATEGORIES, DEFAULT_NAME_TOKENS};

use crate::validator::parse_ratings;

/// Turns the tokens of a `Valid` line into a [`ParsedRecord`].
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    name_tokens: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_TOKENS)
    }
}

impl RecordParser {
    pub fn new(name_tokens: usize) -> Self {
        Self { name_tokens }
    }

    /// Build a record from `tokens`.
    ///
    /// The group key is the name tokens joined with no separator, so
    /// `"Ann Bee Cee"` and `"AnnB ee Cee"` share the key `"AnnBeeCee"`.
    ///
    /// Returns `None` only when `tokens` would not have been classified
    /// `Valid`; the pipeline never calls it in that case.
    pub fn parse(&self, tokens: &[&str]) -> Option<ParsedRecord> {
        if tokens.len() != self.name_tokens + CATEGORIES {
            return None;
        }
        let (names, ratings) = tokens.split_at(self.name_tokens);
        let values = parse_ratings(ratings)?;

        Some(ParsedRecord {
            group_key: names.concat(),
            values,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
