// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report assembly.
//!
//! A [`Report`] gathers every number the renderers display. Renderers only
//! format; anything they show is computed here or by the modules it calls.

use crate::grouping::{category_breakdown, complexity_breakdown, Breakdown};
use crate::ranking::{top_n, Metric};
use crate::summary::{summarize, Summary};
use crate::tokens::{ConversationEstimate, TokenEstimator, ToolOutputEstimate};
use benchlens_core::{BenchmarkResult, ResultSet};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// Default number of entries in ranking sections.
pub const DEFAULT_TOP_N: usize = 10;

/// One row of a ranking section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// 1-based position
    pub rank: usize,
    /// Test identifier
    pub test_id: String,
    /// Test name
    pub test_name: String,
    /// Test category
    pub category: String,
    /// Complexity label
    pub complexity: String,
    /// Duration in milliseconds
    pub duration_ms: f64,
    /// Output size in bytes
    pub output_size_bytes: u64,
    /// Output size in KiB
    pub output_size_kb: f64,
    /// Output line count
    pub output_lines: u64,
}

impl RankedEntry {
    fn from_ranked(ranked: Vec<&BenchmarkResult>) -> Vec<Self> {
        ranked
            .into_iter()
            .enumerate()
            .filter_map(|(i, result)| {
                let metrics = result.metrics()?;
                Some(Self {
                    rank: i + 1,
                    test_id: result.test_id().to_string(),
                    test_name: result.test_name().to_string(),
                    category: result.category().to_string(),
                    complexity: result.complexity().to_string(),
                    duration_ms: metrics.duration_ms,
                    output_size_bytes: metrics.output_size_bytes,
                    output_size_kb: metrics.output_size_bytes as f64 / 1024.0,
                    output_lines: metrics.output_lines,
                })
            })
            .collect()
    }
}

/// Everything the report renderers display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Path or label of the analysed results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
    /// Requested ranking size
    pub top_n: usize,
    /// Overall statistics
    pub summary: Summary,
    /// Per-category statistics
    pub categories: Breakdown,
    /// Per-complexity statistics
    pub complexities: Breakdown,
    /// Slowest passed tests
    pub slowest: Vec<RankedEntry>,
    /// Passed tests with the largest output
    pub largest_outputs: Vec<RankedEntry>,
    /// Tool-output-only token model
    pub tool_output: ToolOutputEstimate,
    /// Full-conversation token model
    pub conversation: ConversationEstimate,
}

impl Report {
    /// Run every analysis over `results`.
    pub fn generate(results: &ResultSet, top: usize, estimator: &TokenEstimator) -> Self {
        let report = Self {
            source: None,
            generated_at: Utc::now(),
            top_n: top,
            summary: summarize(results),
            categories: category_breakdown(results),
            complexities: complexity_breakdown(results),
            slowest: RankedEntry::from_ranked(top_n(results, Metric::Duration, top)),
            largest_outputs: RankedEntry::from_ranked(top_n(results, Metric::OutputSize, top)),
            tool_output: estimator.tool_output(results),
            conversation: estimator.full_conversation(results),
        };

        debug!(
            records = report.summary.total_tests,
            categories = report.categories.len(),
            "Assembled report"
        );

        report
    }

    /// Attach the source label shown in report headers.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchlens_core::PassMetrics;

    fn scenario() -> ResultSet {
        vec![
            BenchmarkResult::passed("T1", "simple lookup", "symbols", "Simple", PassMetrics::new(100.0, 400, 10)).unwrap(),
            BenchmarkResult::passed("T2", "call graph", "references", "Complex", PassMetrics::new(300.0, 1200, 30)).unwrap(),
            BenchmarkResult::failed("T3", "regex", "search", "Medium").unwrap(),
        ]
        .into()
    }

    #[test]
    fn test_generate() {
        let report = Report::generate(&scenario(), 1, &TokenEstimator::default()).with_source("results.json");

        assert_eq!(report.source.as_deref(), Some("results.json"));
        assert_eq!(report.summary.total_tests, 3);
        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.complexities.len(), 3);

        assert_eq!(report.slowest.len(), 1);
        assert_eq!(report.slowest[0].test_id, "T2");
        assert_eq!(report.slowest[0].rank, 1);
        assert_eq!(report.largest_outputs[0].output_size_kb, 1200.0 / 1024.0);

        assert_eq!(report.tool_output.measured.tool_calls, 3.0);
        assert_eq!(report.conversation.measured.tool_calls, 2.0);
    }

    #[test]
    fn test_serializes_to_json() {
        let report = Report::generate(&scenario(), DEFAULT_TOP_N, &TokenEstimator::default());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["summary"]["passed"], 2);
        assert_eq!(value["slowest"].as_array().unwrap().len(), 2);
        assert_eq!(value["tool_output"]["measured"]["output_tokens"], 400.0);
        assert!(value.get("source").is_none());
    }
}
