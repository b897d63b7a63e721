// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Statistics and token-cost estimation over benchmark results.
//!
//! This crate turns a flat [`ResultSet`] into summary numbers, grouped
//! breakdowns, rankings and a two-tier token-savings model, and renders them
//! as text, Markdown or JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use benchlens_analysis::{io, render, Report, TokenEstimator, DEFAULT_TOP_N};
//!
//! let results = io::load_results("results/benchmark.json")?;
//! let report = Report::generate(&results, DEFAULT_TOP_N, &TokenEstimator::default());
//! print!("{}", render::render_text(&report));
//! # Ok::<(), benchlens_analysis::io::LoadError>(())
//! ```
//!
//! # Modules
//!
//! - [`summary`] - Overall pass/fail and duration statistics
//! - [`grouping`] - Category and complexity breakdowns
//! - [`ranking`] - Top-N selection by metric
//! - [`tokens`] - Token-cost estimation models
//! - [`settings`] - Estimator constants and their loading
//! - [`report`] - Report assembly
//! - [`render`] - Plain-text rendering
//! - [`markdown`] - Markdown rendering
//! - [`io`] - Reading and writing result files
//! - [`chart`] - Optional chart sinks

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod chart;
pub mod grouping;
pub mod io;
pub mod markdown;
pub mod ranking;
pub mod render;
pub mod report;
pub mod settings;
pub mod summary;
pub mod tokens;

pub use benchlens_core::{BenchmarkResult, Complexity, PassMetrics, ResultSet, Status};
pub use chart::{ChartData, ChartSink, SkipReason};
pub use grouping::{Breakdown, GroupStats};
pub use ranking::Metric;
pub use report::{RankedEntry, Report, DEFAULT_TOP_N};
pub use settings::EstimatorConfig;
pub use summary::Summary;
pub use tokens::TokenEstimator;

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
