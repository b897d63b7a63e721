// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Optional chart output.
//!
//! Charts are drawn by a [`ChartSink`]. A sink that cannot draw returns a
//! [`SkipReason`] instead of failing; callers log it and carry on with the
//! numeric report. The SVG sink is only compiled with the `charts` feature.

use crate::grouping::Breakdown;
use benchlens_core::ResultSet;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the chart written next to the results file.
pub const CHART_FILE_NAME: &str = "benchmark_charts.svg";

/// Number of bins in the output size histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// Why a chart was not produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    /// Chart support was not compiled in
    #[error("chart rendering is not available in this build")]
    Unavailable,

    /// There is nothing to draw
    #[error("no passed results to chart")]
    NoData,

    /// The chart could not be written
    #[error("failed to write {}: {message}", .path.display())]
    Write {
        /// Target file
        path: PathBuf,
        /// Underlying error message
        message: String,
    },
}

/// One histogram bucket, `[lower_kb, upper_kb)` (the last bucket is closed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Lower edge in KiB
    pub lower_kb: f64,
    /// Upper edge in KiB
    pub upper_kb: f64,
    /// Number of results in the bucket
    pub count: usize,
}

/// Aggregates consumed by chart sinks.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartData {
    /// Average passed duration per category, in category order
    pub category_durations: Vec<(String, f64)>,
    /// Distribution of passed output sizes
    pub output_size_histogram: Vec<HistogramBin>,
}

impl ChartData {
    /// Build chart data from results and their category breakdown.
    pub fn from_results(results: &ResultSet, categories: &Breakdown) -> Self {
        let category_durations = categories
            .groups
            .iter()
            .map(|g| (g.key.clone(), g.avg_duration_ms))
            .collect();

        let sizes_kb: Vec<f64> = results
            .passed()
            .map(|(_, m)| m.output_size_bytes as f64 / 1024.0)
            .collect();

        Self {
            category_durations,
            output_size_histogram: histogram(&sizes_kb, HISTOGRAM_BINS),
        }
    }

    /// Whether there are no passed results to draw.
    pub fn is_empty(&self) -> bool {
        self.output_size_histogram.iter().all(|b| b.count == 0)
    }
}

/// Equal-width histogram over the range of `values`.
///
/// When every value is equal the range is widened by 0.5 on each side.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let index = (((value - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower_kb: lo + width * i as f64,
            upper_kb: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

/// Destination for chart output.
pub trait ChartSink {
    /// Draw the charts, returning where they were written.
    fn render(&self, data: &ChartData) -> Result<PathBuf, SkipReason>;
}

/// Sink used when chart support is not compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableChartSink;

impl ChartSink for UnavailableChartSink {
    fn render(&self, _data: &ChartData) -> Result<PathBuf, SkipReason> {
        Err(SkipReason::Unavailable)
    }
}

/// Chart path for a given results file.
pub fn chart_path_for(results_file: &Path) -> PathBuf {
    results_file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CHART_FILE_NAME)
}

/// The best sink available in this build, writing next to `results_file`.
#[cfg(feature = "charts")]
pub fn default_sink(results_file: &Path) -> Box<dyn ChartSink> {
    Box::new(svg::SvgChartSink::new(chart_path_for(results_file)))
}

/// The best sink available in this build, writing next to `results_file`.
#[cfg(not(feature = "charts"))]
pub fn default_sink(_results_file: &Path) -> Box<dyn ChartSink> {
    Box::new(UnavailableChartSink)
}

#[cfg(feature = "charts")]
pub use svg::SvgChartSink;

#[cfg(feature = "charts")]
mod svg {
    use super::{ChartData, ChartSink, SkipReason};
    use std::fmt::{self, Write};
    use std::path::PathBuf;
    use tracing::debug;

    const WIDTH: f64 = 1400.0;
    const HEIGHT: f64 = 600.0;
    const PANEL_WIDTH: f64 = WIDTH / 2.0;
    const MARGIN_TOP: f64 = 60.0;
    const MARGIN_BOTTOM: f64 = 70.0;
    const MARGIN_RIGHT: f64 = 30.0;
    const BAR_LABEL_WIDTH: f64 = 180.0;
    const HIST_LEFT: f64 = 70.0;

    /// Writes both charts side by side into one SVG file.
    #[derive(Debug, Clone)]
    pub struct SvgChartSink {
        path: PathBuf,
    }

    impl SvgChartSink {
        /// Create a sink writing to `path`.
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Target file.
        pub fn path(&self) -> &std::path::Path {
            &self.path
        }
    }

    impl ChartSink for SvgChartSink {
        fn render(&self, data: &ChartData) -> Result<PathBuf, SkipReason> {
            if data.is_empty() {
                return Err(SkipReason::NoData);
            }

            let mut svg = String::new();
            // Writing into a String cannot fail.
            let _ = draw(&mut svg, data);

            std::fs::write(&self.path, svg).map_err(|e| SkipReason::Write {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

            debug!(path = %self.path.display(), "Wrote chart");
            Ok(self.path.clone())
        }
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    fn draw(svg: &mut String, data: &ChartData) -> fmt::Result {
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = WIDTH,
            h = HEIGHT
        )?;
        writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        draw_durations(svg, &data.category_durations)?;
        draw_histogram(svg, data)?;
        writeln!(svg, "</svg>")
    }

    fn draw_durations(svg: &mut String, durations: &[(String, f64)]) -> fmt::Result {
        let left = BAR_LABEL_WIDTH;
        let plot_width = PANEL_WIDTH - left - MARGIN_RIGHT;
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

        writeln!(
            svg,
            r#"<text x="{:.1}" y="30" text-anchor="middle" font-size="16">Average Query Duration by Category</text>"#,
            PANEL_WIDTH / 2.0
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">Average Duration (ms)</text>"#,
            left + plot_width / 2.0,
            HEIGHT - 20.0
        )?;

        let max = durations.iter().map(|(_, d)| *d).fold(0.0, f64::max);
        if durations.is_empty() {
            return Ok(());
        }

        let slot = plot_height / durations.len() as f64;
        for (i, (category, duration)) in durations.iter().enumerate() {
            let y = MARGIN_TOP + slot * i as f64;
            let width = if max > 0.0 { duration / max * plot_width } else { 0.0 };
            writeln!(
                svg,
                r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#87ceeb"/>"##,
                left,
                y + slot * 0.1,
                width,
                slot * 0.8
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                left - 8.0,
                y + slot / 2.0,
                escape(category)
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" dominant-baseline="middle">{:.1}</text>"#,
                left + width + 4.0,
                y + slot / 2.0,
                duration
            )?;
        }
        Ok(())
    }

    fn draw_histogram(svg: &mut String, data: &ChartData) -> fmt::Result {
        let bins = &data.output_size_histogram;
        let left = PANEL_WIDTH + HIST_LEFT;
        let plot_width = PANEL_WIDTH - HIST_LEFT - MARGIN_RIGHT;
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_height;

        writeln!(
            svg,
            r#"<text x="{:.1}" y="30" text-anchor="middle" font-size="16">Output Size Distribution</text>"#,
            PANEL_WIDTH + PANEL_WIDTH / 2.0
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">Output Size (KB)</text>"#,
            left + plot_width / 2.0,
            HEIGHT - 20.0
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" transform="rotate(-90 {:.1} {:.1})">Number of Tests</text>"#,
            PANEL_WIDTH + 20.0,
            MARGIN_TOP + plot_height / 2.0,
            PANEL_WIDTH + 20.0,
            MARGIN_TOP + plot_height / 2.0
        )?;

        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return Ok(());
        };
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let bar_width = plot_width / bins.len() as f64;

        for (i, bin) in bins.iter().enumerate() {
            let height = bin.count as f64 / max_count as f64 * plot_height;
            writeln!(
                svg,
                r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#90ee90" stroke="black"/>"##,
                left + bar_width * i as f64,
                baseline - height,
                bar_width,
                height
            )?;
        }

        writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
            left,
            baseline,
            left + plot_width,
            baseline
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="start">{:.2}</text>"#,
            left,
            baseline + 16.0,
            first.lower_kb
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{:.2}</text>"#,
            left + plot_width,
            baseline + 16.0,
            last.upper_kb
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
            left - 6.0,
            MARGIN_TOP + 4.0,
            max_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::category_breakdown;
    use benchlens_core::{BenchmarkResult, PassMetrics};

    fn results() -> ResultSet {
        vec![
            BenchmarkResult::passed("T1", "a", "symbols", "Simple", PassMetrics::new(100.0, 1024, 10)).unwrap(),
            BenchmarkResult::passed("T2", "b", "references", "Complex", PassMetrics::new(300.0, 10 * 1024, 30)).unwrap(),
            BenchmarkResult::failed("T3", "c", "search", "Medium").unwrap(),
        ]
        .into()
    }

    #[test]
    fn test_histogram_bins() {
        let bins = histogram(&[1.0, 2.0, 3.0, 10.0], 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![3, 0, 1]);
        assert_eq!(bins[0].lower_kb, 1.0);
        assert_eq!(bins[2].upper_kb, 10.0);
    }

    #[test]
    fn test_histogram_constant_values() {
        let bins = histogram(&[4.0, 4.0], 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(bins[0].lower_kb, 3.5);
        assert!(histogram(&[], 20).is_empty());
    }

    #[test]
    fn test_chart_data() {
        let set = results();
        let data = ChartData::from_results(&set, &category_breakdown(&set));

        assert_eq!(
            data.category_durations,
            vec![
                ("references".to_string(), 300.0),
                ("search".to_string(), 0.0),
                ("symbols".to_string(), 100.0),
            ]
        );
        assert_eq!(data.output_size_histogram.len(), HISTOGRAM_BINS);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_unavailable_sink_skips() {
        let data = ChartData::default();
        assert_eq!(UnavailableChartSink.render(&data), Err(SkipReason::Unavailable));
    }

    #[test]
    fn test_chart_path_next_to_input() {
        assert_eq!(
            chart_path_for(Path::new("/tmp/results/run.json")),
            PathBuf::from("/tmp/results/benchmark_charts.svg")
        );
    }

    #[cfg(feature = "charts")]
    #[test]
    fn test_svg_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let set = results();
        let data = ChartData::from_results(&set, &category_breakdown(&set));

        let sink = SvgChartSink::new(dir.path().join(CHART_FILE_NAME));
        let path = sink.render(&data).unwrap();
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Average Query Duration by Category"));
        assert!(svg.contains(">references<"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[cfg(feature = "charts")]
    #[test]
    fn test_svg_sink_skips_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SvgChartSink::new(dir.path().join(CHART_FILE_NAME));
        assert_eq!(sink.render(&ChartData::default()), Err(SkipReason::NoData));
        assert!(!sink.path().exists());
    }

    #[cfg(feature = "charts")]
    #[test]
    fn test_svg_sink_reports_write_failure() {
        let set = results();
        let data = ChartData::from_results(&set, &category_breakdown(&set));
        let sink = SvgChartSink::new("/nonexistent-dir/benchmark_charts.svg");
        assert!(matches!(sink.render(&data), Err(SkipReason::Write { .. })));
    }
}
