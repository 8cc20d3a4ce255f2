//! Per-creator accumulation of rating vectors.

use std::collections::HashMap;

use ratings_core::models::{Group, Ratings};

// ── GroupAggregator ───────────────────────────────────────────────────────────

/// Owns every [`Group`] of a run, keyed by creator.
///
/// Lookup goes through a hash index into an insertion-ordered `Vec`, so
/// appends are O(1) on average and groups come back in first-seen order.
#[derive(Debug, Default)]
pub struct GroupAggregator {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl GroupAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `values` to the history of `group_key`, creating the group on
    /// first sight. Identical appends are kept as separate entries.
    pub fn append(&mut self, group_key: &str, values: Ratings) {
        let slot = match self.index.get(group_key) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.groups.push(Group::new(group_key));
                self.index.insert(group_key.to_string(), slot);
                slot
            }
        };
        self.groups[slot].push_ratings(values);
    }

    /// All groups in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, group_key: &str) -> Option<&Group> {
        self.index.get(group_key).map(|&slot| &self.groups[slot])
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consume the aggregator and hand the groups over in creation order.
    pub fn into_groups(self) -> Vec<Group> {
        self.groups
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_group_on_first_sight() {
        let mut agg = GroupAggregator::new();
        assert!(agg.is_empty());

        agg.append("AnnBeeCee", [5, 4, 3, 2]);

        assert_eq!(agg.len(), 1);
        let group = agg.get("AnnBeeCee").unwrap();
        assert_eq!(group.history, vec![[5, 4, 3, 2]]);
    }

    #[test]
    fn test_append_accumulates_history_in_order() {
        let mut agg = GroupAggregator::new();
        agg.append("AnnBeeCee", [5, 4, 3, 2]);
        agg.append("AnnBeeCee", [7, 6, 5, 4]);

        assert_eq!(agg.len(), 1);
        assert_eq!(
            agg.get("AnnBeeCee").unwrap().history,
            vec![[5, 4, 3, 2], [7, 6, 5, 4]]
        );
    }

    #[test]
    fn test_duplicate_appends_are_kept() {
        let mut agg = GroupAggregator::new();
        agg.append("x", [1, 2, 3, 4]);
        agg.append("x", [1, 2, 3, 4]);
        assert_eq!(agg.get("x").unwrap().rating_count(), 2);
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let mut agg = GroupAggregator::new();
        agg.append("zed", [0, 0, 0, 0]);
        agg.append("amy", [0, 0, 0, 0]);
        agg.append("zed", [1, 1, 1, 1]);
        agg.append("mia", [0, 0, 0, 0]);

        let keys: Vec<&str> = agg.groups().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["zed", "amy", "mia"]);

        let owned: Vec<String> = agg.into_groups().into_iter().map(|g| g.key).collect();
        assert_eq!(owned, vec!["zed", "amy", "mia"]);
    }

    #[test]
    fn test_get_unknown_key() {
        let agg = GroupAggregator::new();
        assert!(agg.get("nobody").is_none());
    }
}
