// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Overall pass/fail, duration and output-size statistics.

use benchlens_core::{BenchmarkResult, ResultSet};
use serde::Serialize;

/// Aggregate statistics over a set of benchmark results.
///
/// Duration and output fields are computed over passed records only; every
/// average, minimum and maximum is `0` when nothing passed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    /// Number of records
    pub total_tests: usize,
    /// Number of passed records
    pub passed: usize,
    /// Number of failed records
    pub failed: usize,
    /// Passed share in percent, `0` for an empty set
    pub success_rate: f64,
    /// Mean duration of passed records
    pub avg_duration_ms: f64,
    /// Shortest duration of passed records
    pub min_duration_ms: f64,
    /// Longest duration of passed records
    pub max_duration_ms: f64,
    /// Mean output size of passed records
    pub avg_output_size_bytes: f64,
    /// Total output size of passed records
    pub total_output_size_bytes: u128,
}

impl Summary {
    /// Compute statistics over any sequence of records.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a BenchmarkResult>,
    {
        let mut total_tests = 0;
        let mut passed = 0;
        let mut duration_sum = 0.0;
        let mut min_duration: Option<f64> = None;
        let mut max_duration: Option<f64> = None;
        let mut total_output_size_bytes = 0u128;

        for result in results {
            total_tests += 1;
            let Some(metrics) = result.metrics() else {
                continue;
            };

            passed += 1;
            duration_sum += metrics.duration_ms;
            min_duration = Some(min_duration.map_or(metrics.duration_ms, |m| m.min(metrics.duration_ms)));
            max_duration = Some(max_duration.map_or(metrics.duration_ms, |m| m.max(metrics.duration_ms)));
            total_output_size_bytes += u128::from(metrics.output_size_bytes);
        }

        Self {
            total_tests,
            passed,
            failed: total_tests - passed,
            success_rate: percentage(passed as f64, total_tests as f64),
            avg_duration_ms: mean(duration_sum, passed),
            min_duration_ms: min_duration.unwrap_or(0.0),
            max_duration_ms: max_duration.unwrap_or(0.0),
            avg_output_size_bytes: mean(total_output_size_bytes as f64, passed),
            total_output_size_bytes,
        }
    }
}

/// Compute the overall summary of a result set.
pub fn summarize(results: &ResultSet) -> Summary {
    Summary::from_results(results)
}

/// `part / whole * 100`, or `0` when `whole` is not positive.
pub(crate) fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}
