use crate::models::{Group, GroupStatistics, Ratings, CATEGORIES};

// ── StatisticsComputer ────────────────────────────────────────────────────────

/// Stateless collection of the per-group sum and average calculations.
///
/// Statistics are derived once from the complete history rather than kept as
/// running averages, so integer truncation happens exactly once per figure.
pub struct StatisticsComputer;

impl StatisticsComputer {
    /// Compute sums and averages for `history`.
    ///
    /// Ratings are accumulated in `i64` with saturating addition. Every
    /// average is `0` when `history` is empty.
    pub fn summarize(history: &[Ratings]) -> GroupStatistics {
        let sums = Self::category_sums(history);
        let total_sum = sums.iter().fold(0i64, |acc, s| acc.saturating_add(*s));

        let count = history.len() as i64;
        let averages = sums.map(|sum| Self::truncating_average(sum, count));
        let overall_average = Self::truncating_average(total_sum, count);

        GroupStatistics {
            sums,
            total_sum,
            averages,
            overall_average,
        }
    }

    /// Write freshly computed statistics into `group`.
    pub fn finalize(group: &mut Group) {
        group.statistics = Self::summarize(&group.history);
    }

    /// Finalize every group, in order.
    pub fn finalize_all(groups: &mut [Group]) {
        for group in groups.iter_mut() {
            Self::finalize(group);
        }
        tracing::debug!(groups = groups.len(), "group statistics finalized");
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn category_sums(history: &[Ratings]) -> [i64; CATEGORIES] {
        let mut sums = [0i64; CATEGORIES];
        for ratings in history {
            for (sum, value) in sums.iter_mut().zip(ratings) {
                *sum = sum.saturating_add(i64::from(*value));
            }
        }
        sums
    }

    /// Integer division truncating toward zero; a zero count yields zero.
    fn truncating_average(sum: i64, count: i64) -> i64 {
        if count > 0 {
            sum / count
        } else {
            0
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
