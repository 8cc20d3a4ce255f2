//! Plain-text rendering of finalized groups and diagnostics.

use crate::models::{Category, Diagnostic, Group};

/// Render one finalized group as the multi-line block used in the results file.
///
/// The block lists the creator key, the per-category totals, the overall
/// total, then the per-category and overall averages, and ends with a blank
/// line.
pub fn format_group_details(group: &Group) -> String {
    let stats = &group.statistics;
    let mut out = format!("Made by: {}\n", group.key);

    for category in Category::ALL {
        out.push_str(&format!(
            "Total {} score: {}\n",
            category.label(),
            stats.sums[category.index()]
        ));
    }
    out.push_str(&format!("Total overall score: {}\n\n", stats.total_sum));

    for category in Category::ALL {
        out.push_str(&format!(
            "Average {} score: {}\n",
            category.label(),
            stats.averages[category.index()]
        ));
    }
    out.push_str(&format!(
        "Average overall score: {}\n\n",
        stats.overall_average
    ));

    out
}

/// Render every group, each block followed by a separator line.
pub fn format_group_report(groups: &[Group]) -> String {
    groups
        .iter()
        .map(|group| format!("{}\n", format_group_details(group)))
        .collect()
}

/// Render a single diagnostic line, without a trailing newline.
///
/// # Examples
///
/// ```
/// use ratings_core::formatting::format_diagnostic;
/// use ratings_core::models::{Diagnostic, DiagnosticKind};
///
/// let diag = Diagnostic { line_number: 5, kind: DiagnosticKind::InvalidTokenCount };
/// assert_eq!(format_diagnostic(&diag), "Error on line 5: wrong number of tokens.");
/// ```
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    format!(
        "Error on line {}: {}.",
        diagnostic.line_number,
        diagnostic.kind.message()
    )
}

/// Render all diagnostics, one per line.
pub fn format_diagnostic_report(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("{}\n", format_diagnostic(d)))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
