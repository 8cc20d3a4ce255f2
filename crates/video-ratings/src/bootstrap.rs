use std::io::{BufRead, Write};
use std::path::PathBuf;

use ratings_core::error::{RatingsError, Result};
use ratings_core::models::CATEGORIES;
use ratings_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised. Output goes
/// to stderr so it never mixes with the prompt on stdout.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(normalise_level(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

/// Map CLI level names to tracing directives (tracing uses lowercase).
fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

// ── Interactive prompt ─────────────────────────────────────────────────────────

/// Explain the expected file layout, then read a file path from `input`.
///
/// The introduction is skipped with `--quiet`. An empty answer or a closed
/// input yields [`RatingsError::EmptyPath`].
pub fn prompt_for_path<R, W>(input: &mut R, output: &mut W, settings: &Settings) -> Result<PathBuf>
where
    R: BufRead,
    W: Write,
{
    if !settings.quiet {
        write_introduction(output, settings).map_err(RatingsError::Prompt)?;
    }
    write!(output, "Please enter a file name: ").map_err(RatingsError::Prompt)?;
    output.flush().map_err(RatingsError::Prompt)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(RatingsError::Prompt)?;

    let answer = answer.trim();
    if answer.is_empty() {
        return Err(RatingsError::EmptyPath);
    }
    Ok(PathBuf::from(answer))
}

fn write_introduction<W: Write>(out: &mut W, settings: &Settings) -> std::io::Result<()> {
    writeln!(out, "Analyzes a file of video ratings and totals them per creator.")?;
    writeln!(out)?;
    writeln!(out, "Each line of the file should follow the template:")?;
    writeln!(out)?;
    writeln!(out, "    {}", line_template(settings.name_tokens as usize))?;
    writeln!(out)?;
    writeln!(out, "where every rating is an integer (content, layout, technical, creativity).")?;
    writeln!(out, "Lines starting with \"{}\" are skipped.", settings.ignore_prefix)?;
    writeln!(out)?;
    writeln!(out, "Invalid lines are skipped and listed with their line number and a")?;
    writeln!(
        out,
        "reason such as \"wrong number of tokens\" or \"ratings are not integers\""
    )?;
    writeln!(out, "in \"{}\".", settings.errors.display())?;
    writeln!(out)?;
    Ok(())
}

/// Placeholder layout of a record line, e.g. `name name name rating ...`.
fn line_template(name_tokens: usize) -> String {
    std::iter::repeat("name")
        .take(name_tokens)
        .chain(std::iter::repeat("rating").take(CATEGORIES))
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
