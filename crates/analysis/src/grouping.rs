// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-category and per-complexity breakdowns.
//!
//! Grouping is explicit and ordered: partitions are [`BTreeMap`]s, so the
//! category breakdown iterates in lexicographic key order and the complexity
//! breakdown follows the tier order `Simple`, `Medium`, `Complex`. Groups
//! whose complexity is not a tier are left out of the complexity breakdown and
//! listed in [`Breakdown::omitted`] instead.

use crate::summary::Summary;
use benchlens_core::{BenchmarkResult, Complexity, ResultSet};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Statistics for one group of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    /// Group key
    pub key: String,
    /// Number of records in the group
    pub total_tests: usize,
    /// Number of passed records in the group
    pub passed: usize,
    /// Number of failed records in the group
    pub failed: usize,
    /// Passed share in percent
    pub success_rate: f64,
    /// Mean duration of passed records
    pub avg_duration_ms: f64,
    /// Mean output size of passed records
    pub avg_output_size_bytes: f64,
}

impl GroupStats {
    /// Compute statistics for the records of one group.
    pub fn from_results<'a, I>(key: impl Into<String>, results: I) -> Self
    where
        I: IntoIterator<Item = &'a BenchmarkResult>,
    {
        let summary = Summary::from_results(results);
        Self {
            key: key.into(),
            total_tests: summary.total_tests,
            passed: summary.passed,
            failed: summary.failed,
            success_rate: summary.success_rate,
            avg_duration_ms: summary.avg_duration_ms,
            avg_output_size_bytes: summary.avg_output_size_bytes,
        }
    }
}

/// Ordered list of group statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Breakdown {
    /// Groups in breakdown order
    pub groups: Vec<GroupStats>,
    /// Keys present in the data but excluded from this breakdown
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<String>,
}

impl Breakdown {
    /// Look up a group by key.
    pub fn get(&self, key: &str) -> Option<&GroupStats> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the breakdown has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Partition records by a key, preserving insertion order inside each group.
pub fn partition<'a, K, F>(results: &'a ResultSet, key: F) -> BTreeMap<K, Vec<&'a BenchmarkResult>>
where
    K: Ord,
    F: Fn(&'a BenchmarkResult) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a BenchmarkResult>> = BTreeMap::new();
    for result in results {
        groups.entry(key(result)).or_default().push(result);
    }
    groups
}

/// Partition records by category.
pub fn partition_by_category(results: &ResultSet) -> BTreeMap<&str, Vec<&BenchmarkResult>> {
    partition(results, |r| r.category())
}

/// Partition records by complexity, including labels outside the tiers.
pub fn partition_by_complexity(results: &ResultSet) -> BTreeMap<&Complexity, Vec<&BenchmarkResult>> {
    partition(results, |r| r.complexity())
}

/// Per-category statistics in lexicographic category order.
pub fn category_breakdown(results: &ResultSet) -> Breakdown {
    let groups: Vec<GroupStats> = partition_by_category(results)
        .into_iter()
        .map(|(category, members)| GroupStats::from_results(category, members))
        .collect();

    debug!(groups = groups.len(), "Computed category breakdown");

    Breakdown {
        groups,
        omitted: Vec::new(),
    }
}

/// Per-complexity statistics in tier order.
///
/// Tiers with no records are absent; non-tier labels are reported in
/// [`Breakdown::omitted`].
pub fn complexity_breakdown(results: &ResultSet) -> Breakdown {
    let mut groups = Vec::new();
    let mut omitted = Vec::new();

    // Complexity orders the tiers first, so map order is already tier order.
    for (complexity, members) in partition_by_complexity(results) {
        if complexity.is_tier() {
            groups.push(GroupStats::from_results(complexity.as_str(), members));
        } else {
            omitted.push(complexity.to_string());
        }
    }

    if !omitted.is_empty() {
        debug!(?omitted, "Complexity labels outside the fixed tiers");
    }

    Breakdown { groups, omitted }
}
