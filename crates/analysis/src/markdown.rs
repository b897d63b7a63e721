// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output generation for benchmark reports.
//!
//! Same sections as the plain-text report, laid out as tables.

use crate::grouping::Breakdown;
use crate::render::thousands;
use crate::report::{RankedEntry, Report};
use crate::tokens::{ConversationUsage, ToolOutputUsage};
use std::fmt::{self, Write};

/// Generate a markdown report.
pub fn generate_report(report: &Report) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut output, report);
    output
}

fn write_report(output: &mut String, report: &Report) -> fmt::Result {
    writeln!(output, "# Benchmark Report")?;
    writeln!(output)?;
    if let Some(source) = &report.source {
        writeln!(output, "Source: `{}`", source)?;
        writeln!(output)?;
    }
    writeln!(output, "Generated: {}", report.generated_at.to_rfc3339())?;
    writeln!(output)?;

    let s = &report.summary;
    writeln!(output, "## Summary")?;
    writeln!(output)?;
    writeln!(output, "| Metric | Value |")?;
    writeln!(output, "|--------|-------|")?;
    writeln!(output, "| Total tests | {} |", s.total_tests)?;
    writeln!(output, "| Passed | {} ({:.1}%) |", s.passed, s.success_rate)?;
    writeln!(output, "| Failed | {} |", s.failed)?;
    writeln!(output, "| Average duration | {:.2} ms |", s.avg_duration_ms)?;
    writeln!(output, "| Min duration | {:.2} ms |", s.min_duration_ms)?;
    writeln!(output, "| Max duration | {:.2} ms |", s.max_duration_ms)?;
    writeln!(output, "| Average output size | {} bytes |", thousands(s.avg_output_size_bytes))?;
    writeln!(output, "| Total output size | {} bytes |", thousands(s.total_output_size_bytes as f64))?;
    writeln!(output)?;

    write_breakdown(output, "Categories", &report.categories)?;
    write_breakdown(output, "Complexity", &report.complexities)?;
    write_ranking(output, &format!("Top {} Slowest Tests", report.top_n), &report.slowest)?;
    write_ranking(output, &format!("Top {} Largest Outputs", report.top_n), &report.largest_outputs)?;

    let tool = &report.tool_output;
    writeln!(output, "## Tool Output Token Impact")?;
    writeln!(output)?;
    writeln!(output, "| | Measured | Baseline (est.) |")?;
    writeln!(output, "|---|---:|---:|")?;
    write_tool_rows(output, &tool.measured, &tool.baseline)?;
    writeln!(output)?;
    writeln!(
        output,
        "Savings: **{} tokens ({:.1}%)**, {:.0} fewer tool calls.",
        thousands(tool.savings.tokens),
        tool.savings.percent,
        tool.savings.tool_calls
    )?;
    writeln!(output)?;

    let conv = &report.conversation;
    writeln!(output, "## Realistic Total Token Impact")?;
    writeln!(output)?;
    writeln!(output, "| | Measured | Baseline (est.) |")?;
    writeln!(output, "|---|---:|---:|")?;
    write_conversation_rows(output, &conv.measured, &conv.baseline)?;
    writeln!(output)?;
    writeln!(
        output,
        "Savings: **{} tokens ({:.1}%)**, {:.0} fewer tool calls.",
        thousands(conv.savings.tokens),
        conv.savings.percent,
        conv.savings.tool_calls
    )?;

    Ok(())
}

fn write_breakdown(output: &mut String, title: &str, breakdown: &Breakdown) -> fmt::Result {
    writeln!(output, "## {}", title)?;
    writeln!(output)?;
    writeln!(output, "| Group | Tests | Passed | Success Rate | Avg Duration | Avg Output |")?;
    writeln!(output, "|-------|------:|-------:|-------------:|-------------:|-----------:|")?;

    for group in &breakdown.groups {
        writeln!(
            output,
            "| {} | {} | {} | {:.1}% | {:.2} ms | {} bytes |",
            group.key,
            group.total_tests,
            group.passed,
            group.success_rate,
            group.avg_duration_ms,
            thousands(group.avg_output_size_bytes)
        )?;
    }

    if !breakdown.omitted.is_empty() {
        writeln!(output)?;
        writeln!(output, "_Not shown: {}_", breakdown.omitted.join(", "))?;
    }

    writeln!(output)
}

fn write_ranking(output: &mut String, title: &str, entries: &[RankedEntry]) -> fmt::Result {
    writeln!(output, "## {}", title)?;
    writeln!(output)?;
    writeln!(output, "| # | Test | Category | Duration | Output |")?;
    writeln!(output, "|--:|------|----------|---------:|-------:|")?;

    for entry in entries {
        writeln!(
            output,
            "| {} | {}: {} | {} | {:.2} ms | {:.2} KB ({} lines) |",
            entry.rank,
            entry.test_id,
            entry.test_name,
            entry.category,
            entry.duration_ms,
            entry.output_size_kb,
            entry.output_lines
        )?;
    }

    writeln!(output)
}

fn write_tool_rows(output: &mut String, measured: &ToolOutputUsage, baseline: &ToolOutputUsage) -> fmt::Result {
    writeln!(output, "| Tool calls | {:.0} | {:.0} |", measured.tool_calls, baseline.tool_calls)?;
    for (label, m, b) in [
        ("Output tokens", measured.output_tokens, baseline.output_tokens),
        ("Overhead tokens", measured.overhead_tokens, baseline.overhead_tokens),
        ("**Total tokens**", measured.total_tokens, baseline.total_tokens),
    ] {
        writeln!(output, "| {} | {} | {} |", label, thousands(m), thousands(b))?;
    }
    Ok(())
}

fn write_conversation_rows(
    output: &mut String,
    measured: &ConversationUsage,
    baseline: &ConversationUsage,
) -> fmt::Result {
    for (label, m, b) in [
        ("User prompts", measured.user_prompt_tokens, baseline.user_prompt_tokens),
        ("Reasoning", measured.reasoning_tokens, baseline.reasoning_tokens),
        ("Tool output", measured.tool_output_tokens, baseline.tool_output_tokens),
        ("Tool overhead", measured.tool_overhead_tokens, baseline.tool_overhead_tokens),
        ("Response", measured.response_tokens, baseline.response_tokens),
        ("**Total**", measured.total_tokens, baseline.total_tokens),
    ] {
        writeln!(output, "| {} | {} | {} |", label, thousands(m), thousands(b))?;
    }
    Ok(())
}
