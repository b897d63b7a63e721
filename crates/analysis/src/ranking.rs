// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Top-N selection of passed results by a numeric metric.

use benchlens_core::{BenchmarkResult, PassMetrics, ResultSet};
use serde::{Deserialize, Serialize};

/// Metric a ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Query duration in milliseconds
    Duration,
    /// Output size in bytes
    OutputSize,
    /// Output line count
    OutputLines,
}

impl Metric {
    /// Read this metric from a passed record.
    pub fn value(self, metrics: &PassMetrics) -> f64 {
        match self {
            Metric::Duration => metrics.duration_ms,
            Metric::OutputSize => metrics.output_size_bytes as f64,
            Metric::OutputLines => metrics.output_lines as f64,
        }
    }
}

/// Up to `top_n` passed records, highest `metric` first.
///
/// The sort is stable, so records with equal values keep their insertion
/// order. Failed records never appear.
pub fn top_by<F>(results: &ResultSet, top_n: usize, metric: F) -> Vec<&BenchmarkResult>
where
    F: Fn(&PassMetrics) -> f64,
{
    let mut scored: Vec<(&BenchmarkResult, f64)> = results
        .passed()
        // Adding +0.0 folds -0.0 into +0.0 so equal values stay tied.
        .map(|(result, metrics)| (result, metric(metrics) + 0.0))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_n);
    scored.into_iter().map(|(result, _)| result).collect()
}

/// Up to `top_n` passed records ranked by a named metric.
pub fn top_n(results: &ResultSet, metric: Metric, top_n: usize) -> Vec<&BenchmarkResult> {
    top_by(results, top_n, |m| metric.value(m))
}
