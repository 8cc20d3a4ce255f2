//! Writers for the results and diagnostics files.

use std::path::Path;

use ratings_core::error::{RatingsError, Result};
use ratings_core::formatting::{format_diagnostic_report, format_group_report};
use ratings_core::models::{Diagnostic, Group};
use ratings_data::pipeline::{AnalysisResult, RunMetadata};
use serde::Serialize;

/// Shape of the results file in `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: &'a RunMetadata,
    groups: &'a [Group],
}

/// Write the per-creator results to `path`, as text or pretty JSON.
pub fn write_results(path: &Path, result: &AnalysisResult, json: bool) -> Result<()> {
    let contents = if json {
        let report = JsonReport {
            metadata: &result.metadata,
            groups: &result.groups,
        };
        let mut body = serde_json::to_string_pretty(&report)?;
        body.push('\n');
        body
    } else {
        format_group_report(&result.groups)
    };
    write_file(path, &contents)?;
    tracing::debug!(groups = result.groups.len(), "results written to {}", path.display());
    Ok(())
}

/// Write one line per rejected input line to `path`. An empty list still
/// produces an (empty) file so stale diagnostics never linger.
pub fn write_diagnostics(path: &Path, diagnostics: &[Diagnostic]) -> Result<()> {
    write_file(path, &format_diagnostic_report(diagnostics))?;
    tracing::debug!(
        diagnostics = diagnostics.len(),
        "diagnostics written to {}",
        path.display()
    );
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| RatingsError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratings_core::models::{DiagnosticKind, LineSchema};
    use ratings_data::pipeline::{analyze_lines, RunOutcome};
    use tempfile::TempDir;

    fn sample_result() -> AnalysisResult {
        let outcome = analyze_lines(
            ["Ann Bee Cee 5 4 3 2", "Dee Eff Gee 1 1 1 1", "x y"],
            LineSchema::default(),
        );
        match outcome {
            RunOutcome::Completed(result) => result,
            RunOutcome::Empty { .. } => panic!("expected groups"),
        }
    }

    #[test]
    fn test_write_results_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("videoResults.text");

        write_results(&path, &sample_result(), false).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Made by: AnnBeeCee\n"));
        assert!(text.contains("Made by: DeeEffGee\n"));
        assert!(text.contains("Total overall score: 14\n"));
    }

    #[test]
    fn test_write_results_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");

        write_results(&path, &sample_result(), true).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["groups"][0]["key"], "AnnBeeCee");
        assert_eq!(value["groups"][1]["averages"][0], 1);
        assert_eq!(value["metadata"]["lines_rejected"], 1);
        assert!(value.get("diagnostics").is_none());
    }

    #[test]
    fn test_write_diagnostics() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalidLines.text");
        let diags = vec![Diagnostic {
            line_number: 3,
            kind: DiagnosticKind::InvalidTokenCount,
        }];

        write_diagnostics(&path, &diags).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Error on line 3: wrong number of tokens.\n");
    }

    #[test]
    fn test_write_diagnostics_empty_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalidLines.text");
        std::fs::write(&path, "stale\n").unwrap();

        write_diagnostics(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("out.text");

        let err = write_diagnostics(&path, &[]).unwrap_err();

        assert!(matches!(err, RatingsError::ReportWrite { .. }));
    }
}
