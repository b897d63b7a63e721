// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ordered, read-only collection of benchmark records.

use crate::result::{BenchmarkResult, PassMetrics};
use serde::{Deserialize, Serialize};

/// An ordered batch of benchmark results.
///
/// Insertion order is preserved and is the tie-break every ranking relies
/// on. The set exposes read-only views only; analysis never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<BenchmarkResult>,
}

impl ResultSet {
    /// Create a result set from records in their original order.
    pub fn new(results: Vec<BenchmarkResult>) -> Self {
        Self { results }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over all records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkResult> {
        self.results.iter()
    }

    /// Iterate over passed records together with their metrics.
    pub fn passed(&self) -> impl Iterator<Item = (&BenchmarkResult, &PassMetrics)> {
        self.results
            .iter()
            .filter_map(|r| r.metrics().map(|m| (r, m)))
    }

    /// Number of passed records.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_passed()).count()
    }

    /// Number of failed records.
    pub fn failed_count(&self) -> usize {
        self.len() - self.passed_count()
    }

    /// Records as a slice.
    pub fn as_slice(&self) -> &[BenchmarkResult] {
        &self.results
    }
}

impl From<Vec<BenchmarkResult>> for ResultSet {
    fn from(results: Vec<BenchmarkResult>) -> Self {
        Self::new(results)
    }
}

impl FromIterator<BenchmarkResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = BenchmarkResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a BenchmarkResult;
    type IntoIter = std::slice::Iter<'a, BenchmarkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        vec![
            BenchmarkResult::passed("T1", "one", "a", "Simple", PassMetrics::new(1.0, 10, 1)).unwrap(),
            BenchmarkResult::failed("T2", "two", "a", "Medium").unwrap(),
            BenchmarkResult::passed("T3", "three", "b", "Complex", PassMetrics::new(3.0, 30, 3)).unwrap(),
        ]
        .into()
    }

    #[test]
    fn test_counts() {
        let set = sample();
        assert_eq!(set.len(), 3);
        assert_eq!(set.passed_count(), 2);
        assert_eq!(set.failed_count(), 1);
        assert!(!set.is_empty());
        assert!(ResultSet::default().is_empty());
    }

    #[test]
    fn test_passed_view_preserves_order() {
        let set = sample();
        let ids: Vec<&str> = set.passed().map(|(r, _)| r.test_id()).collect();
        assert_eq!(ids, vec!["T1", "T3"]);
    }

    #[test]
    fn test_deserialize_array() {
        let json = r#"[
            {"test_id": "T1", "test_name": "one", "category": "a", "complexity": "Simple",
             "status": "PASS", "duration_ms": 1, "output_size_bytes": 10, "output_lines": 1},
            {"test_id": "T2", "test_name": "two", "category": "a", "complexity": "Medium",
             "status": "FAIL"}
        ]"#;

        let set: ResultSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[1].test_id(), "T2");
    }
}
