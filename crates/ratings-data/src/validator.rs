//! Line classification against the record schema.

use ratings_core::models::{Classification, LineSchema, Ratings, CATEGORIES};

/// Split a raw line into tokens.
///
/// Leading and trailing control characters (anything up to and including a
/// space) are trimmed first. The rest is split on runs of ASCII whitespace,
/// vertical tab included. A blank line yields no tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.trim_matches(|c: char| c <= ' ')
        .split(is_separator)
        .filter(|token| !token.is_empty())
        .collect()
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Parse exactly [`CATEGORIES`] base-10 integer tokens.
///
/// Accepts an optional leading sign; rejects decimals, separators and values
/// outside the `i32` range. Returns `None` when any token fails or when the
/// token count is not [`CATEGORIES`].
pub fn parse_ratings(tokens: &[&str]) -> Option<Ratings> {
    if tokens.len() != CATEGORIES {
        return None;
    }
    let mut ratings = [0i32; CATEGORIES];
    for (slot, token) in ratings.iter_mut().zip(tokens) {
        *slot = token.parse().ok()?;
    }
    Some(ratings)
}

// ── LineValidator ─────────────────────────────────────────────────────────────

/// Decides whether a raw line is ignorable, malformed, or usable.
#[derive(Debug, Clone, Default)]
pub struct LineValidator {
    schema: LineSchema,
}

impl LineValidator {
    pub fn new(schema: LineSchema) -> Self {
        Self { schema }
    }

    /// Classify one raw line.
    ///
    /// The ignore prefix is checked against the untrimmed line and wins over
    /// every other rule.
    pub fn classify(&self, line: &str) -> Classification {
        if line.starts_with(self.schema.ignore_prefix.as_str()) {
            return Classification::Ignored;
        }

        let tokens = tokenize(line);
        if tokens.len() != self.schema.required_tokens() {
            return Classification::InvalidTokenCount;
        }

        match parse_ratings(&tokens[self.schema.name_tokens..]) {
            Some(_) => Classification::Valid,
            None => Classification::InvalidRatingType,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
