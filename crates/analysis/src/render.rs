// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Plain-text report rendering.
//!
//! Sections are emitted in a fixed order with aligned labels, two decimals
//! for durations, one decimal for rates and thousands separators for token
//! and byte counts.

use crate::grouping::Breakdown;
use crate::report::{RankedEntry, Report};
use num_format::{Locale, ToFormattedString};
use std::fmt;

const RULE_WIDTH: usize = 60;
const SUBTOTAL_RULE: &str = "─────────────────────────────────";

const CONVERSATION_EXTRAS: [&str; 3] = [
    "User prompts (~20-100 tokens per message)",
    "Assistant reasoning and explanations (~50-200 tokens)",
    "Conversation context (accumulates over turns)",
];

const EXPECTED_SAVINGS: [(&str, &str); 3] = [
    ("Simple queries (grep-like):", "10-20%"),
    ("Medium queries (symbol search):", "30-50%"),
    ("Complex queries (multi-step):", "50-70%"),
];

const EVEN_RESULTS_REASONS: [&str; 4] = [
    "Conversation context accumulates (dominates on turn 5+)",
    "Prompt caching reduces input tokens (masks differences)",
    "Simple queries tested (built-in tools work well)",
    "Try symbol-aware queries for biggest impact!",
];

/// Format a count with thousands separators, rounding to the nearest integer.
pub fn thousands(value: f64) -> String {
    (value.round() as i128).to_formatted_string(&Locale::en)
}

/// Render the report as plain text.
pub fn render_text(report: &Report) -> String {
    TextReport(report).to_string()
}

/// [`fmt::Display`] adapter producing the plain-text report.
pub struct TextReport<'a>(pub &'a Report);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write_summary(f, report)?;
        write_breakdown(f, "CATEGORY BREAKDOWN", &report.categories)?;
        write_breakdown(f, "COMPLEXITY BREAKDOWN", &report.complexities)?;
        write_slowest(f, report.top_n, &report.slowest)?;
        write_largest(f, report.top_n, &report.largest_outputs)?;
        write_tool_output(f, report)?;
        write_conversation(f, report)
    }
}

fn header(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "=".repeat(RULE_WIDTH))
}

fn write_summary(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    let s = &report.summary;
    header(f, "BENCHMARK SUMMARY")?;
    writeln!(f, "Total Tests:        {}", s.total_tests)?;
    writeln!(f, "Passed:             {} ({:.1}%)", s.passed, s.success_rate)?;
    writeln!(f, "Failed:             {}", s.failed)?;
    writeln!(f)?;
    writeln!(f, "Average Duration:   {:.2} ms", s.avg_duration_ms)?;
    writeln!(f, "Min Duration:       {:.2} ms", s.min_duration_ms)?;
    writeln!(f, "Max Duration:       {:.2} ms", s.max_duration_ms)?;
    writeln!(f)?;
    writeln!(f, "Average Output Size: {} bytes", thousands(s.avg_output_size_bytes))?;
    writeln!(f, "Total Output Size:   {} bytes", thousands(s.total_output_size_bytes as f64))?;
    writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(f)
}

fn write_breakdown(f: &mut fmt::Formatter<'_>, title: &str, breakdown: &Breakdown) -> fmt::Result {
    header(f, title)?;

    for group in &breakdown.groups {
        writeln!(f)?;
        writeln!(f, "{}:", group.key)?;
        writeln!(f, "  Tests:          {}", group.total_tests)?;
        writeln!(f, "  Success Rate:   {:.1}%", group.success_rate)?;
        writeln!(f, "  Avg Duration:   {:.2} ms", group.avg_duration_ms)?;
        writeln!(f, "  Avg Output:     {} bytes", thousands(group.avg_output_size_bytes))?;
    }

    if !breakdown.omitted.is_empty() {
        writeln!(f)?;
        writeln!(f, "(not shown: {})", breakdown.omitted.join(", "))?;
    }

    writeln!(f)
}

fn write_slowest(f: &mut fmt::Formatter<'_>, top_n: usize, entries: &[RankedEntry]) -> fmt::Result {
    header(f, &format!("TOP {} SLOWEST TESTS", top_n))?;

    for entry in entries {
        writeln!(f, "{}. {}: {}", entry.rank, entry.test_id, entry.test_name)?;
        writeln!(f, "   Duration: {:.2} ms", entry.duration_ms)?;
        writeln!(f, "   Category: {}", entry.category)?;
        writeln!(f)?;
    }

    Ok(())
}

fn write_largest(f: &mut fmt::Formatter<'_>, top_n: usize, entries: &[RankedEntry]) -> fmt::Result {
    header(f, &format!("TOP {} LARGEST OUTPUTS", top_n))?;

    for entry in entries {
        writeln!(f, "{}. {}: {}", entry.rank, entry.test_id, entry.test_name)?;
        writeln!(
            f,
            "   Output Size: {:.2} KB ({} lines)",
            entry.output_size_kb, entry.output_lines
        )?;
        writeln!(f, "   Category: {}", entry.category)?;
        writeln!(f)?;
    }

    Ok(())
}

fn write_tool_output(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    let estimate = &report.tool_output;
    header(f, "TOOL OUTPUT TOKEN IMPACT (Partial View)")?;
    writeln!(f)?;

    for (label, usage) in [
        ("Measured Tool Output:", &estimate.measured),
        ("Baseline Tool Output (Estimated):", &estimate.baseline),
    ] {
        writeln!(f, "{}", label)?;
        writeln!(f, "  Tool Calls:       {:.0}", usage.tool_calls)?;
        writeln!(f, "  Output Tokens:    {}", thousands(usage.output_tokens))?;
        writeln!(f, "  Overhead Tokens:  {}", thousands(usage.overhead_tokens))?;
        writeln!(f, "  Total Tokens:     {}", thousands(usage.total_tokens))?;
        writeln!(f)?;
    }

    writeln!(f, "Tool Output Savings:")?;
    writeln!(
        f,
        "  Token Reduction:  {} tokens ({:.1}%)",
        thousands(estimate.savings.tokens),
        estimate.savings.percent
    )?;
    writeln!(f, "  Tool Call Reduction: {:.0} calls", estimate.savings.tool_calls)?;
    writeln!(f)?;

    writeln!(f, "NOTE: This only shows TOOL OUTPUT savings.")?;
    writeln!(f, "    Real conversations also include:")?;
    for extra in CONVERSATION_EXTRAS {
        writeln!(f, "    - {}", extra)?;
    }
    writeln!(f)
}

fn write_conversation(f: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    let estimate = &report.conversation;
    header(f, "REALISTIC TOTAL TOKEN IMPACT")?;
    writeln!(f)?;
    writeln!(f, "Estimated tokens of the full conversation, not just tool output")?;
    writeln!(f)?;

    for (label, usage) in [
        ("Measured Tool (Full Conversation):", &estimate.measured),
        ("Baseline Tool (Full Conversation):", &estimate.baseline),
    ] {
        writeln!(f, "{}", label)?;
        writeln!(f, "  User Prompts:           {} tokens", thousands(usage.user_prompt_tokens))?;
        writeln!(f, "  Reasoning:              {} tokens", thousands(usage.reasoning_tokens))?;
        writeln!(f, "  Tool Output:            {} tokens", thousands(usage.tool_output_tokens))?;
        writeln!(f, "  Tool Overhead:          {} tokens", thousands(usage.tool_overhead_tokens))?;
        writeln!(f, "  Response:               {} tokens", thousands(usage.response_tokens))?;
        writeln!(f, "  {}", SUBTOTAL_RULE)?;
        writeln!(f, "  TOTAL:                  {} tokens", thousands(usage.total_tokens))?;
        writeln!(f)?;
    }

    writeln!(f, "Realistic Total Savings:")?;
    writeln!(
        f,
        "  Token Reduction:        {} tokens ({:.1}%)",
        thousands(estimate.savings.tokens),
        estimate.savings.percent
    )?;
    writeln!(f, "  Tool Calls Saved:       {:.0} calls", estimate.savings.tool_calls)?;
    writeln!(f)?;

    writeln!(f, "Expected Savings by Query Type:")?;
    for (kind, range) in EXPECTED_SAVINGS {
        writeln!(f, "  {:<32}{} total conversation tokens", kind, range)?;
    }
    writeln!(f)?;

    writeln!(f, "Why you might see 'fairly even' results:")?;
    for reason in EVEN_RESULTS_REASONS {
        writeln!(f, "  - {}", reason)?;
    }
    writeln!(f)
}
