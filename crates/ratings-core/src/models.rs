use serde::{Deserialize, Serialize};

/// Number of rating categories carried by every record.
pub const CATEGORIES: usize = 4;

/// Default number of leading name tokens on a record line.
pub const DEFAULT_NAME_TOKENS: usize = 3;

/// Lines starting with this prefix are skipped without a diagnostic.
pub const DEFAULT_IGNORE_PREFIX: &str = "Block";

/// One rating per category, in column order.
pub type Ratings = [i32; CATEGORIES];

// ── Category ──────────────────────────────────────────────────────────────────

/// The fixed rating dimensions, in the order they appear on a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Content,
    Layout,
    Technical,
    Creativity,
}

impl Category {
    /// All categories in column order.
    pub const ALL: [Category; CATEGORIES] = [
        Category::Content,
        Category::Layout,
        Category::Technical,
        Category::Creativity,
    ];

    /// Lowercase display label used by the text report.
    pub fn label(self) -> &'static str {
        match self {
            Category::Content => "content",
            Category::Layout => "layout",
            Category::Technical => "technical",
            Category::Creativity => "creativity",
        }
    }

    /// Column index of this category inside a [`Ratings`] array.
    pub fn index(self) -> usize {
        self as usize
    }
}

// ── LineSchema ────────────────────────────────────────────────────────────────

/// Shape a record line must have to be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSchema {
    /// Lines starting with this prefix (before trimming) are ignored.
    pub ignore_prefix: String,
    /// How many leading tokens form the group key.
    pub name_tokens: usize,
}

impl LineSchema {
    pub fn new(ignore_prefix: impl Into<String>, name_tokens: usize) -> Self {
        Self {
            ignore_prefix: ignore_prefix.into(),
            name_tokens,
        }
    }

    /// Exact token count a record line must split into.
    pub fn required_tokens(&self) -> usize {
        self.name_tokens + CATEGORIES
    }
}

impl Default for LineSchema {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_PREFIX, DEFAULT_NAME_TOKENS)
    }
}

// ── Classification ────────────────────────────────────────────────────────────

/// Verdict of the line validator for one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Starts with the ignore prefix; dropped silently.
    Ignored,
    /// Matches the schema and can be parsed.
    Valid,
    /// Did not split into the required number of tokens.
    InvalidTokenCount,
    /// Right token count, but at least one rating is not an integer.
    InvalidRatingType,
}

impl Classification {
    /// The diagnostic kind for a rejected line, or `None` for lines that are
    /// either usable or deliberately ignored.
    pub fn diagnostic_kind(self) -> Option<DiagnosticKind> {
        match self {
            Classification::InvalidTokenCount => Some(DiagnosticKind::InvalidTokenCount),
            Classification::InvalidRatingType => Some(DiagnosticKind::InvalidRatingType),
            Classification::Ignored | Classification::Valid => None,
        }
    }
}

// ── ParsedRecord ──────────────────────────────────────────────────────────────

/// Group key and ratings extracted from a valid line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    /// Name tokens joined with no separator.
    pub group_key: String,
    pub values: Ratings,
}

// ── Group ─────────────────────────────────────────────────────────────────────

/// Derived figures for one group; all zero until the group is finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStatistics {
    /// Per-category sum over the whole history.
    pub sums: [i64; CATEGORIES],
    /// Sum of the per-category sums.
    pub total_sum: i64,
    /// Per-category `sums[i] / history.len()`, truncated toward zero.
    pub averages: [i64; CATEGORIES],
    /// `total_sum / history.len()`, truncated toward zero.
    pub overall_average: i64,
}

/// All ratings collected for one creator key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    /// Every rating vector appended for this key, in input order.
    pub history: Vec<Ratings>,
    #[serde(flatten)]
    pub statistics: GroupStatistics,
}

impl Group {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            history: Vec::new(),
            statistics: GroupStatistics::default(),
        }
    }

    /// Record one more rating vector.
    pub fn push_ratings(&mut self, values: Ratings) {
        self.history.push(values);
    }

    /// Number of rating vectors collected so far.
    pub fn rating_count(&self) -> usize {
        self.history.len()
    }
}

// ── Diagnostic ────────────────────────────────────────────────────────────────

/// Why a line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    InvalidTokenCount,
    InvalidRatingType,
}

impl DiagnosticKind {
    /// Fixed human-readable reason rendered in the diagnostics report.
    pub fn message(self) -> &'static str {
        match self {
            DiagnosticKind::InvalidTokenCount => "wrong number of tokens",
            DiagnosticKind::InvalidRatingType => "ratings are not integers",
        }
    }
}

/// A rejected line, identified by its 1-based position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line_number: usize,
    pub kind: DiagnosticKind,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
