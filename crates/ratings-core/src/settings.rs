use clap::Parser;
use std::path::PathBuf;

use crate::error::{RatingsError, Result};
use crate::models::{LineSchema, DEFAULT_IGNORE_PREFIX, DEFAULT_NAME_TOKENS};

/// Default path of the per-group results report.
pub const DEFAULT_OUTPUT_FILE: &str = "videoResults.text";

/// Default path of the rejected-line report.
pub const DEFAULT_ERROR_FILE: &str = "invalidLines.text";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sum and average video ratings grouped by creator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "video-ratings",
    about = "Sum and average video ratings grouped by creator",
    version
)]
pub struct Settings {
    /// Ratings file to analyze (prompted for when omitted)
    pub input: Option<PathBuf>,

    /// Where to write the per-creator results
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Where to write the rejected-line diagnostics
    #[arg(long, default_value = DEFAULT_ERROR_FILE)]
    pub errors: PathBuf,

    /// Results file format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Lines starting with this prefix are skipped silently
    #[arg(long, default_value = DEFAULT_IGNORE_PREFIX)]
    pub ignore_prefix: String,

    /// Number of leading name tokens on each line (1-16)
    #[arg(long, default_value_t = DEFAULT_NAME_TOKENS as u32, value_parser = clap::value_parser!(u32).range(1..=16))]
    pub name_tokens: u32,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Skip the introduction text
    #[arg(long)]
    pub quiet: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Build the line schema the validator should enforce.
    pub fn schema(&self) -> Result<LineSchema> {
        if self.ignore_prefix.is_empty() {
            return Err(RatingsError::Config(
                "ignore prefix must not be empty".to_string(),
            ));
        }
        Ok(LineSchema::new(
            self.ignore_prefix.clone(),
            self.name_tokens as usize,
        ))
    }

    /// Whether the results file should be JSON rather than text.
    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
