//! Validation and aggregation pipeline.
//!
//! Feeds raw lines through the [`LineValidator`], [`RecordParser`] and
//! [`GroupAggregator`], records a [`Diagnostic`] for every rejected line, and
//! finalizes group statistics once the input is exhausted.

use chrono::Utc;
use ratings_core::models::{Classification, Diagnostic, Group, LineSchema};
use ratings_core::statistics::StatisticsComputer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregator::GroupAggregator;
use crate::parser::RecordParser;
use crate::validator::{tokenize, LineValidator};

// ── Public types ──────────────────────────────────────────────────────────────

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// RFC 3339 timestamp when the run finished.
    pub generated_at: String,
    /// Every line pulled from the source.
    pub lines_read: usize,
    /// Lines dropped by the ignore prefix.
    pub lines_ignored: usize,
    /// Lines that produced a diagnostic.
    pub lines_rejected: usize,
    /// Valid lines appended to a group.
    pub records_aggregated: usize,
    /// Distinct group keys.
    pub groups_created: usize,
}

/// Finalized output of a run that produced at least one group.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub metadata: RunMetadata,
    /// Groups in first-seen order, statistics filled in.
    pub groups: Vec<Group>,
    /// Rejected lines in input order.
    pub diagnostics: Vec<Diagnostic>,
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// At least one valid line was aggregated.
    Completed(AnalysisResult),
    /// No line was valid. Diagnostics are still reported.
    Empty {
        metadata: RunMetadata,
        diagnostics: Vec<Diagnostic>,
    },
}

impl RunOutcome {
    pub fn metadata(&self) -> &RunMetadata {
        match self {
            RunOutcome::Completed(result) => &result.metadata,
            RunOutcome::Empty { metadata, .. } => metadata,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            RunOutcome::Completed(result) => &result.diagnostics,
            RunOutcome::Empty { diagnostics, .. } => diagnostics,
        }
    }

    /// Finalized groups; empty for [`RunOutcome::Empty`].
    pub fn groups(&self) -> &[Group] {
        match self {
            RunOutcome::Completed(result) => &result.groups,
            RunOutcome::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RunOutcome::Empty { .. })
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Single-pass fold over the input lines.
pub struct Pipeline {
    validator: LineValidator,
    parser: RecordParser,
    aggregator: GroupAggregator,
    diagnostics: Vec<Diagnostic>,
    metadata: RunMetadata,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(LineSchema::default())
    }
}

impl Pipeline {
    pub fn new(schema: LineSchema) -> Self {
        let parser = RecordParser::new(schema.name_tokens);
        Self {
            validator: LineValidator::new(schema),
            parser,
            aggregator: GroupAggregator::new(),
            diagnostics: Vec::new(),
            metadata: RunMetadata::default(),
        }
    }

    /// Route the next line. Line numbers are assigned in call order,
    /// starting at 1.
    pub fn feed(&mut self, line: &str) {
        self.metadata.lines_read += 1;
        let line_number = self.metadata.lines_read;

        let classification = self.validator.classify(line);
        match classification {
            Classification::Ignored => {
                self.metadata.lines_ignored += 1;
            }
            Classification::Valid => match self.parser.parse(&tokenize(line)) {
                Some(record) => {
                    self.aggregator.append(&record.group_key, record.values);
                    self.metadata.records_aggregated += 1;
                }
                None => {
                    // Validator and parser share the same rules.
                    warn!(line_number, "valid line could not be parsed; skipping");
                }
            },
            Classification::InvalidTokenCount | Classification::InvalidRatingType => {
                if let Some(kind) = classification.diagnostic_kind() {
                    debug!(line_number, reason = kind.message(), "rejected line");
                    self.diagnostics.push(Diagnostic { line_number, kind });
                    self.metadata.lines_rejected += 1;
                }
            }
        }
    }

    /// Groups accumulated so far, in creation order, not yet finalized.
    pub fn groups(&self) -> &[Group] {
        self.aggregator.groups()
    }

    /// Diagnostics recorded so far, in input order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Close the run: finalize every group, or report an empty result.
    pub fn finish(self) -> RunOutcome {
        let Pipeline {
            aggregator,
            diagnostics,
            mut metadata,
            ..
        } = self;

        metadata.groups_created = aggregator.len();
        metadata.generated_at = Utc::now().to_rfc3339();

        if aggregator.is_empty() {
            warn!(
                lines_read = metadata.lines_read,
                lines_rejected = metadata.lines_rejected,
                "no valid ratings found"
            );
            return RunOutcome::Empty {
                metadata,
                diagnostics,
            };
        }

        let mut groups = aggregator.into_groups();
        StatisticsComputer::finalize_all(&mut groups);

        info!(
            lines_read = metadata.lines_read,
            groups = metadata.groups_created,
            records = metadata.records_aggregated,
            rejected = metadata.lines_rejected,
            ignored = metadata.lines_ignored,
            "ratings aggregated"
        );

        RunOutcome::Completed(AnalysisResult {
            metadata,
            groups,
            diagnostics,
        })
    }

    /// Feed every line of `lines`, then [`finish`](Self::finish).
    pub fn run<I, S>(mut self, lines: I) -> RunOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed(line.as_ref());
        }
        self.finish()
    }
}

/// Run the full pipeline over `lines` with `schema`.
pub fn analyze_lines<I, S>(lines: I, schema: LineSchema) -> RunOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Pipeline::new(schema).run(lines)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratings_core::models::DiagnosticKind;

    const SAMPLE: [&str; 6] = [
        "Ann Bee Cee 5 4 3 2",
        "Ann Bee Cee 7 6 5 4",
        "Dee Eff Gee 1 1 1 1",
        "Block this line 9 9 9 9",
        "x y",
        "Ann Bee Cee 0 0 0 x",
    ];

    fn run_default(lines: &[&str]) -> RunOutcome {
        analyze_lines(lines.iter().copied(), LineSchema::default())
    }

    // ── end to end ────────────────────────────────────────────────────────────

    #[test]
    fn test_sample_groups() {
        let outcome = run_default(&SAMPLE);
        let RunOutcome::Completed(result) = outcome else {
            panic!("expected a completed run");
        };

        assert_eq!(result.groups.len(), 2);

        let ann = &result.groups[0];
        assert_eq!(ann.key, "AnnBeeCee");
        assert_eq!(ann.history, vec![[5, 4, 3, 2], [7, 6, 5, 4]]);
        assert_eq!(ann.statistics.sums, [12, 10, 8, 6]);
        assert_eq!(ann.statistics.total_sum, 36);
        assert_eq!(ann.statistics.averages, [6, 5, 4, 3]);
        assert_eq!(ann.statistics.overall_average, 18);

        let dee = &result.groups[1];
        assert_eq!(dee.key, "DeeEffGee");
        assert_eq!(dee.history, vec![[1, 1, 1, 1]]);
        assert_eq!(dee.statistics.sums, [1, 1, 1, 1]);
        assert_eq!(dee.statistics.total_sum, 4);
        assert_eq!(dee.statistics.averages, [1, 1, 1, 1]);
        assert_eq!(dee.statistics.overall_average, 4);
    }

    #[test]
    fn test_sample_diagnostics() {
        let outcome = run_default(&SAMPLE);
        assert_eq!(
            outcome.diagnostics(),
            &[
                Diagnostic {
                    line_number: 5,
                    kind: DiagnosticKind::InvalidTokenCount,
                },
                Diagnostic {
                    line_number: 6,
                    kind: DiagnosticKind::InvalidRatingType,
                },
            ]
        );
    }

    #[test]
    fn test_sample_metadata() {
        let outcome = run_default(&SAMPLE);
        let meta = outcome.metadata();
        assert_eq!(meta.lines_read, 6);
        assert_eq!(meta.lines_ignored, 1);
        assert_eq!(meta.lines_rejected, 2);
        assert_eq!(meta.records_aggregated, 3);
        assert_eq!(meta.groups_created, 2);
        assert!(!meta.generated_at.is_empty());
    }

    // ── empty result ──────────────────────────────────────────────────────────

    #[test]
    fn test_only_invalid_lines_is_empty() {
        let outcome = run_default(&["Block 1 2 3", "x y", "a b c 1 2 3 z"]);
        assert!(outcome.is_empty());
        assert!(outcome.groups().is_empty());
        assert_eq!(outcome.diagnostics().len(), 2);
        assert_eq!(outcome.metadata().lines_ignored, 1);
    }

    #[test]
    fn test_no_lines_is_empty() {
        let outcome = run_default(&[]);
        assert!(outcome.is_empty());
        assert!(outcome.diagnostics().is_empty());
        assert_eq!(outcome.metadata().lines_read, 0);
    }

    // ── grouping ──────────────────────────────────────────────────────────────

    #[test]
    fn test_repeated_line_counts_twice() {
        let outcome = run_default(&["a b c 1 2 3 4", "a b c 1 2 3 4"]);
        let group = &outcome.groups()[0];
        assert_eq!(group.history, vec![[1, 2, 3, 4], [1, 2, 3, 4]]);
        assert_eq!(group.statistics.sums, [2, 4, 6, 8]);
        assert_eq!(group.statistics.averages, [1, 2, 3, 4]);
        assert_eq!(group.statistics.overall_average, 10);
    }

    #[test]
    fn test_groups_follow_first_seen_order() {
        let outcome = run_default(&[
            "z z z 1 1 1 1",
            "a a a 1 1 1 1",
            "z z z 2 2 2 2",
            "m m m 1 1 1 1",
        ]);
        let keys: Vec<&str> = outcome.groups().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["zzz", "aaa", "mmm"]);
    }

    #[test]
    fn test_blank_lines_are_rejected_with_line_numbers() {
        let outcome = run_default(&["", "a b c 1 2 3 4", "   "]);
        let lines: Vec<usize> = outcome
            .diagnostics()
            .iter()
            .map(|d| d.line_number)
            .collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_feed_exposes_progress() {
        let mut pipeline = Pipeline::default();
        pipeline.feed("a b c 1 2 3 4");
        pipeline.feed("bad");
        assert_eq!(pipeline.groups().len(), 1);
        assert_eq!(pipeline.groups()[0].statistics.total_sum, 0);
        assert_eq!(pipeline.diagnostics().len(), 1);
    }

    #[test]
    fn test_custom_schema() {
        let outcome = analyze_lines(["# note", "Ann 1 2 3 4"], LineSchema::new("#", 1));
        assert_eq!(outcome.groups()[0].key, "Ann");
        assert!(outcome.diagnostics().is_empty());
    }

    #[test]
    fn test_result_serializes_to_json() {
        let RunOutcome::Completed(result) = run_default(&SAMPLE) else {
            panic!("expected a completed run");
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["groups"][0]["key"], "AnnBeeCee");
        assert_eq!(value["groups"][0]["overall_average"], 18);
        assert_eq!(value["diagnostics"][1]["kind"], "invalid_rating_type");
        assert_eq!(value["metadata"]["lines_read"], 6);
    }
}
