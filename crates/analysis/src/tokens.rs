// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Token-cost estimation for the measured tool versus a baseline tool.
//!
//! Two models are provided:
//!
//! - **Tool output only**: tokens in the text returned by tool calls plus a
//!   fixed overhead per call. Measured calls count every record, passed or
//!   failed.
//! - **Full conversation**: adds the user prompt, assistant reasoning and
//!   assistant response of every turn. Only passed records count as turns.
//!
//! The baseline tool is assumed to need more calls per task (weighted by
//! complexity) and to return more verbose output. All constants come from
//! [`EstimatorConfig`].
//!
//! # Example
//!
//! ```
//! use benchlens_analysis::tokens::TokenEstimator;
//! use benchlens_core::{BenchmarkResult, PassMetrics, ResultSet};
//!
//! let results: ResultSet = vec![
//!     BenchmarkResult::passed("T1", "find struct", "symbols", "Simple", PassMetrics::new(12.0, 800, 20))?,
//!     BenchmarkResult::passed("T2", "trace callers", "references", "Complex", PassMetrics::new(40.0, 1200, 35))?,
//! ]
//! .into();
//!
//! let estimate = TokenEstimator::default().tool_output(&results);
//! assert_eq!(estimate.measured.total_tokens, 600.0);
//! assert_eq!(estimate.baseline.total_tokens, 1225.0);
//! # Ok::<(), benchlens_core::ValidationError>(())
//! ```

use crate::settings::EstimatorConfig;
use crate::summary::percentage;
use benchlens_core::{BenchmarkResult, ResultSet};
use serde::Serialize;
use tracing::debug;

/// Token usage of one tool under the tool-output-only model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ToolOutputUsage {
    /// Number of tool calls (fractional for the baseline)
    pub tool_calls: f64,
    /// Tokens of tool output text
    pub output_tokens: f64,
    /// Fixed per-call overhead tokens
    pub overhead_tokens: f64,
    /// Output plus overhead
    pub total_tokens: f64,
}

impl ToolOutputUsage {
    fn new(tool_calls: f64, output_tokens: f64, overhead_per_call: f64) -> Self {
        let overhead_tokens = tool_calls * overhead_per_call;
        Self {
            tool_calls,
            output_tokens,
            overhead_tokens,
            total_tokens: output_tokens + overhead_tokens,
        }
    }
}

/// Token usage of one tool under the full-conversation model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ConversationUsage {
    /// Number of tool calls (fractional for the baseline)
    pub tool_calls: f64,
    /// User prompt tokens
    pub user_prompt_tokens: f64,
    /// Assistant reasoning tokens
    pub reasoning_tokens: f64,
    /// Tool output tokens
    pub tool_output_tokens: f64,
    /// Per-call tool overhead tokens
    pub tool_overhead_tokens: f64,
    /// Assistant response tokens
    pub response_tokens: f64,
    /// Sum of all components
    pub total_tokens: f64,
}

impl ConversationUsage {
    fn total(mut self) -> Self {
        self.total_tokens = self.user_prompt_tokens
            + self.reasoning_tokens
            + self.tool_output_tokens
            + self.tool_overhead_tokens
            + self.response_tokens;
        self
    }
}

/// Difference between baseline and measured usage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Savings {
    /// Baseline total minus measured total
    pub tokens: f64,
    /// Token savings relative to the baseline total, `0` when that is zero
    pub percent: f64,
    /// Baseline calls minus measured calls
    pub tool_calls: f64,
}

impl Savings {
    fn between(baseline_total: f64, measured_total: f64, baseline_calls: f64, measured_calls: f64) -> Self {
        let tokens = baseline_total - measured_total;
        Self {
            tokens,
            percent: percentage(tokens, baseline_total),
            tool_calls: baseline_calls - measured_calls,
        }
    }
}

/// Result of the tool-output-only model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ToolOutputEstimate {
    /// Measured tool usage
    pub measured: ToolOutputUsage,
    /// Estimated baseline tool usage
    pub baseline: ToolOutputUsage,
    /// Baseline minus measured
    pub savings: Savings,
}

/// Result of the full-conversation model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ConversationEstimate {
    /// Measured tool usage
    pub measured: ConversationUsage,
    /// Estimated baseline tool usage
    pub baseline: ConversationUsage,
    /// Baseline minus measured
    pub savings: Savings,
}

/// Projects token consumption of the measured tool against the baseline.
///
/// The estimator holds nothing but its configuration; both models are pure
/// functions of the input results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenEstimator {
    config: EstimatorConfig,
}

impl TokenEstimator {
    /// Create an estimator with the given constants.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Constants in use.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimated baseline calls replacing one measured call per record.
    pub fn baseline_calls<'a, I>(&self, results: I) -> f64
    where
        I: IntoIterator<Item = &'a BenchmarkResult>,
    {
        results
            .into_iter()
            .map(|r| self.config.multipliers.for_complexity(r.complexity()))
            .sum()
    }

    fn output_tokens(&self, results: &ResultSet) -> f64 {
        let chars: u128 = results
            .passed()
            .map(|(_, m)| u128::from(m.output_size_bytes))
            .sum();
        chars as f64 / self.config.chars_per_token
    }

    /// Tool-output-only model.
    ///
    /// Every record counts as one measured call and contributes to the
    /// baseline call estimate; only passed records contribute output.
    pub fn tool_output(&self, results: &ResultSet) -> ToolOutputEstimate {
        let cfg = &self.config;
        let output_tokens = self.output_tokens(results);

        let measured = ToolOutputUsage::new(results.len() as f64, output_tokens, cfg.tool_call_overhead);
        let baseline = ToolOutputUsage::new(
            self.baseline_calls(results),
            output_tokens * cfg.baseline_verbosity,
            cfg.tool_call_overhead,
        );

        let savings = Savings::between(
            baseline.total_tokens,
            measured.total_tokens,
            baseline.tool_calls,
            measured.tool_calls,
        );

        debug!(
            measured_total = measured.total_tokens,
            baseline_total = baseline.total_tokens,
            savings_pct = savings.percent,
            "Estimated tool output tokens"
        );

        ToolOutputEstimate {
            measured,
            baseline,
            savings,
        }
    }

    /// Full-conversation model.
    ///
    /// Each passed record is one conversational turn. The baseline keeps the
    /// same number of turns but pays the scaled reasoning and response cost
    /// per turn, plus complexity-weighted tool calls.
    pub fn full_conversation(&self, results: &ResultSet) -> ConversationEstimate {
        let cfg = &self.config;
        let turns = results.passed_count() as f64;
        let output_tokens = self.output_tokens(results);
        let baseline_calls = self.baseline_calls(results.passed().map(|(r, _)| r));

        let measured = ConversationUsage {
            tool_calls: turns,
            user_prompt_tokens: turns * cfg.user_prompt_tokens,
            reasoning_tokens: turns * cfg.reasoning_tokens,
            tool_output_tokens: output_tokens,
            tool_overhead_tokens: turns * cfg.tool_call_overhead,
            response_tokens: turns * cfg.response_tokens,
            total_tokens: 0.0,
        }
        .total();

        let baseline = ConversationUsage {
            tool_calls: baseline_calls,
            user_prompt_tokens: turns * cfg.user_prompt_tokens,
            reasoning_tokens: turns * cfg.baseline_reasoning_tokens(),
            tool_output_tokens: output_tokens * cfg.baseline_verbosity,
            tool_overhead_tokens: baseline_calls * cfg.tool_call_overhead,
            response_tokens: turns * cfg.baseline_response_tokens(),
            total_tokens: 0.0,
        }
        .total();

        let savings = Savings::between(
            baseline.total_tokens,
            measured.total_tokens,
            baseline.tool_calls,
            measured.tool_calls,
        );

        debug!(
            turns,
            measured_total = measured.total_tokens,
            baseline_total = baseline.total_tokens,
            savings_pct = savings.percent,
            "Estimated full conversation tokens"
        );

        ConversationEstimate {
            measured,
            baseline,
            savings,
        }
    }
}
