// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for benchlens.
//!
//! Loads a benchmark results file, prints the statistics and token-impact
//! report, and optionally writes charts next to the input.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use benchlens_analysis::chart::{self, ChartData};
use benchlens_analysis::{
    io, markdown, render, render_json, EstimatorConfig, Report, ResultSet, TokenEstimator,
    DEFAULT_TOP_N,
};
use clap::{ArgAction, Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Analyze code-search benchmark results.
#[derive(Parser, Debug)]
#[command(name = "benchlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the benchmark results JSON file.
    pub results_file: PathBuf,

    /// Generate performance charts next to the results file.
    #[arg(long)]
    pub plot: bool,

    /// Number of entries in the ranking sections.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Estimator configuration file (TOML, YAML or JSON).
    #[arg(short, long, env = "BENCHLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log filter directive, e.g. `debug` or `benchlens_analysis=trace`.
    #[arg(long, env = "BENCHLENS_LOG")]
    pub log_level: Option<String>,

    /// Emit diagnostics as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

/// Report output formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text sections
    Text,
    /// Markdown tables
    Markdown,
    /// The full report as JSON
    Json,
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if loading or rendering fails.
pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Execute a parsed command line, writing the report to `out`.
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = EstimatorConfig::load(cli.config.as_deref())
        .context("Failed to load estimator configuration")?;

    let results = io::load_results(&cli.results_file)?;

    let report = Report::generate(&results, cli.top, &TokenEstimator::new(config))
        .with_source(cli.results_file.display().to_string());

    let rendered = match cli.format {
        OutputFormat::Text => render::render_text(&report),
        OutputFormat::Markdown => markdown::generate_report(&report),
        OutputFormat::Json => {
            let mut json = render_json(&report).context("Failed to serialize report")?;
            json.push('\n');
            json
        }
    };

    out.write_all(rendered.as_bytes())?;
    out.flush()?;

    if cli.plot {
        write_charts(&cli.results_file, &results, &report);
    }

    Ok(())
}

/// Draw charts; failures are reported as warnings and never abort the run.
fn write_charts(results_file: &Path, results: &ResultSet, report: &Report) {
    let data = ChartData::from_results(results, &report.categories);

    match chart::default_sink(results_file).render(&data) {
        Ok(path) => {
            info!(path = %path.display(), "Charts saved");
            eprintln!("Charts saved to: {}", path.display());
        }
        Err(reason) => warn!(%reason, "Skipping chart generation"),
    }
}

/// Install the global tracing subscriber, logging to stderr.
///
/// `RUST_LOG` takes precedence over `--log-level`, which takes precedence
/// over the `-v` count. An unparsable `RUST_LOG` is reported as a warning
/// and the command line choice is used instead.
fn init_tracing(cli: &Cli) -> Result<()> {
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let directive = cli.log_level.as_deref().unwrap_or(default_level);

    let mut rejected = None;
    let env_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(value) => match EnvFilter::try_new(&value) {
            Ok(filter) => Some(filter),
            Err(e) => {
                rejected = Some((value, e));
                None
            }
        },
        Err(_) => None,
    };

    let filter = match env_filter {
        Some(filter) => filter,
        None => EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid log filter: {}", directive))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if cli.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if let Some((value, error)) = rejected {
        warn!(rust_log = %value, %error, fallback = directive, "Ignoring invalid RUST_LOG");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const RESULTS: &str = r#"[
        {"test_id": "T1", "test_name": "simple lookup", "category": "symbols", "complexity": "Simple",
         "status": "PASS", "duration_ms": 100, "output_size_bytes": 400, "output_lines": 10},
        {"test_id": "T2", "test_name": "call graph", "category": "references", "complexity": "Complex",
         "status": "PASS", "duration_ms": 300, "output_size_bytes": 1200, "output_lines": 30},
        {"test_id": "T3", "test_name": "regex", "category": "search", "complexity": "Medium",
         "status": "FAIL"}
    ]"#;

    fn cli_for(path: &Path, args: &[&str]) -> Cli {
        let mut argv = vec!["benchlens".to_string(), path.display().to_string()];
        argv.extend(args.iter().map(|a| a.to_string()));
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let cli = cli_for(Path::new("results.json"), &[]);
        assert_eq!(cli.top, 10);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.plot);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_flags() {
        let cli = cli_for(Path::new("r.json"), &["--plot", "--top", "3", "-f", "markdown", "-vv"]);
        assert!(cli.plot);
        assert_eq!(cli.top, 3);
        assert_eq!(cli.format, OutputFormat::Markdown);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_rejects_negative_top() {
        assert!(Cli::try_parse_from(["benchlens", "r.json", "--top", "-1"]).is_err());
    }

    #[test]
    fn test_execute_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(&path, RESULTS).unwrap();

        let mut out = Vec::new();
        execute(&cli_for(&path, &["--top", "1"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Passed:             2 (66.7%)"));
        assert!(text.contains("TOP 1 SLOWEST TESTS"));
        assert!(text.contains("1. T2: call graph"));
    }

    #[test]
    fn test_execute_missing_file() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let err = execute(&cli_for(&dir.path().join("none.json"), &[]), &mut out).unwrap_err();

        assert!(err.to_string().contains("not found"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_execute_empty_file_renders_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "[]").unwrap();

        let mut out = Vec::new();
        let err = execute(&cli_for(&path, &[]), &mut out).unwrap_err();
        assert!(err.to_string().contains("No results"));
        assert!(out.is_empty());
    }
}
