mod bootstrap;
mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use ratings_core::error::RatingsError;
use ratings_core::settings::Settings;
use ratings_data::pipeline::{Pipeline, RunOutcome};
use ratings_data::reader::FileLineSource;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Video ratings v{} starting", env!("CARGO_PKG_VERSION"));

    let input = resolve_input(&settings)?;
    let outcome = match analyze_file(&settings, &input) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}", failure_hint(&e, &input));
            return Err(e.into());
        }
    };

    match outcome {
        RunOutcome::Completed(result) => {
            println!(
                "Results for {} creator(s) written to \"{}\".",
                result.groups.len(),
                settings.output.display()
            );
            if !result.diagnostics.is_empty() {
                println!(
                    "{} invalid line(s) listed in \"{}\".",
                    result.diagnostics.len(),
                    settings.errors.display()
                );
            }
        }
        RunOutcome::Empty { diagnostics, .. } => {
            println!("Could not find any video ratings in \"{}\".", input.display());
            println!("Please add lines that follow the expected template.");
            if !diagnostics.is_empty() {
                println!(
                    "{} invalid line(s) listed in \"{}\".",
                    diagnostics.len(),
                    settings.errors.display()
                );
            }
        }
    }

    Ok(())
}

/// Use the positional path when given, otherwise ask on the console.
fn resolve_input(settings: &Settings) -> Result<PathBuf> {
    if let Some(path) = &settings.input {
        return Ok(path.clone());
    }
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let path = bootstrap::prompt_for_path(&mut input, &mut output, settings)?;
    println!();
    Ok(path)
}

/// Run the pipeline over `input` and write the report files.
///
/// The diagnostics file is always written; the results file only when at
/// least one group was produced.
fn analyze_file(settings: &Settings, input: &Path) -> ratings_core::Result<RunOutcome> {
    let schema = settings.schema()?;
    let mut source = FileLineSource::open(input)?;

    tracing::info!("Analyzing {}", source.path().display());
    let outcome = Pipeline::new(schema).run(source.lines()?);

    report::write_diagnostics(&settings.errors, outcome.diagnostics())?;
    if let RunOutcome::Completed(result) = &outcome {
        report::write_results(&settings.output, result, settings.wants_json())?;
    }

    Ok(outcome)
}

/// User-facing explanation for a failed run, chosen by what went wrong.
fn failure_hint(err: &RatingsError, input: &Path) -> String {
    match err {
        RatingsError::SourceUnavailable { .. } => format!(
            "Could not analyze \"{}\". Please check that you entered the correct file name.",
            input.display()
        ),
        RatingsError::ReportWrite { path, .. } => format!(
            "Could not create the output or error file \"{}\". \
             Check that its folder exists, is writable and has free space.",
            path.display()
        ),
        RatingsError::Config(reason) => format!("Invalid settings: {reason}."),
        other => format!("Could not analyze \"{}\": {other}.", input.display()),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
