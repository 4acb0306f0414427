//! Vote tallies.
//!
//! A tally maps each candidate to the number of votes cast for it. The map is
//! ordered by candidate name so its JSON form is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate vote count per candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally(BTreeMap<String, i64>);

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` votes for `candidate`.
    pub fn add(&mut self, candidate: impl Into<String>, count: i64) {
        *self.0.entry(candidate.into()).or_insert(0) += count;
    }

    /// Votes for a candidate, zero if it has none.
    pub fn get(&self, candidate: &str) -> i64 {
        self.0.get(candidate).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct candidates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Total votes across all candidates.
    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }

    /// Candidates ordered by count (highest first), ties broken by name.
    pub fn ranked(&self) -> Vec<(&str, i64)> {
        let mut rows: Vec<(&str, i64)> = self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn into_inner(self) -> BTreeMap<String, i64> {
        self.0
    }
}

impl FromIterator<(String, i64)> for Tally {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (candidate, count) in iter {
            tally.add(candidate, count);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally_serializes_as_empty_object() {
        let tally = Tally::new();
        assert!(tally.is_empty());
        assert_eq!(serde_json::to_string(&tally).unwrap(), "{}");
    }

    #[test]
    fn add_accumulates() {
        let mut tally = Tally::new();
        tally.add("Alice", 1);
        tally.add("Alice", 1);
        tally.add("Bob", 1);
        assert_eq!(tally.get("Alice"), 2);
        assert_eq!(tally.get("Bob"), 1);
        assert_eq!(tally.get("Carol"), 0);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn ranked_orders_by_count_then_name() {
        let tally: Tally = vec![
            ("Carol".to_string(), 2),
            ("Alice".to_string(), 1),
            ("Bob".to_string(), 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(tally.ranked(), vec![("Bob", 2), ("Carol", 2), ("Alice", 1)]);
    }

    #[test]
    fn serialization_format() {
        let tally: Tally = vec![("Bob".to_string(), 3), ("Alice".to_string(), 1)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"Alice":1,"Bob":3}"#);
    }
}
