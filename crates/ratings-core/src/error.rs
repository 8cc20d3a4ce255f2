use std::path::PathBuf;
use thiserror::Error;

/// All run-level errors produced by the ratings analyzer.
///
/// Per-line problems (wrong token count, non-integer ratings) are never
/// errors: they become [`Diagnostic`](crate::models::Diagnostic) records.
#[derive(Error, Debug)]
pub enum RatingsError {
    /// The ratings file could not be opened.
    #[error("Could not access file {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report or diagnostics file could not be created or written.
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The interactive prompt could not read from the console.
    #[error("Could not read from keyboard: {0}")]
    Prompt(#[source] std::io::Error),

    /// The user answered the file prompt with an empty line.
    #[error("No file name was entered")]
    EmptyPath,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A report could not be serialised to JSON.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the ratings crates.
pub type Result<T> = std::result::Result<T, RatingsError>;
