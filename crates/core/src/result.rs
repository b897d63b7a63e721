// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark result types.
//!
//! A [`BenchmarkResult`] describes a single test case executed against the
//! measured code-search tool. Duration and output metrics only exist on
//! passed records, so they live in [`PassMetrics`] which a failed record
//! simply does not have.

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a benchmark test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The test case produced the expected output.
    Pass,
    /// The test case failed or errored.
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "PASS"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// Coarse task-difficulty classification of a test case.
///
/// The three tiers are ordered `Simple < Medium < Complex`. Any other label
/// found in the input is kept verbatim as [`Complexity::Other`] and sorts
/// after the tiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Complexity {
    /// Single lookup, grep-like query.
    Simple,
    /// Symbol-aware search.
    Medium,
    /// Multi-step investigation.
    Complex,
    /// Label outside the fixed tier set.
    Other(String),
}

impl Complexity {
    /// The fixed tiers, in breakdown order.
    pub const TIERS: [Complexity; 3] = [Complexity::Simple, Complexity::Medium, Complexity::Complex];

    /// Whether this is one of the fixed tiers.
    pub fn is_tier(&self) -> bool {
        !matches!(self, Complexity::Other(_))
    }

    /// Label as it appears in result files.
    pub fn as_str(&self) -> &str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Medium => "Medium",
            Complexity::Complex => "Complex",
            Complexity::Other(label) => label,
        }
    }
}

impl From<String> for Complexity {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Simple" => Complexity::Simple,
            "Medium" => Complexity::Medium,
            "Complex" => Complexity::Complex,
            _ => Complexity::Other(label),
        }
    }
}

impl From<&str> for Complexity {
    fn from(label: &str) -> Self {
        Complexity::from(label.to_string())
    }
}

impl From<Complexity> for String {
    fn from(complexity: Complexity) -> Self {
        match complexity {
            Complexity::Other(label) => label,
            tier => tier.as_str().to_string(),
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics recorded for a passed test case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassMetrics {
    /// Wall-clock duration of the query in milliseconds.
    pub duration_ms: f64,
    /// Size of the tool output in bytes.
    pub output_size_bytes: u64,
    /// Number of lines in the tool output.
    pub output_lines: u64,
}

impl PassMetrics {
    /// Create metrics for a passed test case.
    pub fn new(duration_ms: f64, output_size_bytes: u64, output_lines: u64) -> Self {
        Self {
            duration_ms,
            output_size_bytes,
            output_lines,
        }
    }
}

/// A single benchmark execution record.
///
/// Records are immutable once constructed; every constructor validates the
/// identifiers and, for passed records, the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBenchmarkResult", into = "RawBenchmarkResult")]
pub struct BenchmarkResult {
    test_id: String,
    test_name: String,
    category: String,
    complexity: Complexity,
    metrics: Option<PassMetrics>,
}

impl BenchmarkResult {
    /// Create a record for a passed test case.
    pub fn passed(
        test_id: impl Into<String>,
        test_name: impl Into<String>,
        category: impl Into<String>,
        complexity: impl Into<Complexity>,
        metrics: PassMetrics,
    ) -> Result<Self> {
        Self::build(
            test_id.into(),
            test_name.into(),
            category.into(),
            complexity.into(),
            Some(metrics),
        )
    }

    /// Create a record for a failed test case.
    pub fn failed(
        test_id: impl Into<String>,
        test_name: impl Into<String>,
        category: impl Into<String>,
        complexity: impl Into<Complexity>,
    ) -> Result<Self> {
        Self::build(
            test_id.into(),
            test_name.into(),
            category.into(),
            complexity.into(),
            None,
        )
    }

    fn build(
        test_id: String,
        test_name: String,
        category: String,
        complexity: Complexity,
        metrics: Option<PassMetrics>,
    ) -> Result<Self> {
        if test_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("test_id"));
        }
        if test_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("test_name"));
        }
        if let Some(m) = &metrics {
            if !m.duration_ms.is_finite() || m.duration_ms < 0.0 {
                return Err(ValidationError::InvalidDuration {
                    test_id,
                    value: m.duration_ms,
                });
            }
        }

        Ok(Self {
            test_id,
            test_name,
            category,
            complexity,
            metrics,
        })
    }

    /// Unique test identifier.
    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    /// Human-readable test name.
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Free-form grouping category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Complexity of the task.
    pub fn complexity(&self) -> &Complexity {
        &self.complexity
    }

    /// Outcome of the test case.
    pub fn status(&self) -> Status {
        if self.metrics.is_some() {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    /// Whether the test case passed.
    pub fn is_passed(&self) -> bool {
        self.metrics.is_some()
    }

    /// Metrics of a passed test case; `None` for failures.
    pub fn metrics(&self) -> Option<&PassMetrics> {
        self.metrics.as_ref()
    }
}

/// On-disk shape of a benchmark record.
///
/// Failed records routinely omit the numeric fields; any that are present
/// are dropped on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBenchmarkResult {
    test_id: String,
    test_name: String,
    category: String,
    complexity: Complexity,
    status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_lines: Option<u64>,
}

impl TryFrom<RawBenchmarkResult> for BenchmarkResult {
    type Error = ValidationError;

    fn try_from(raw: RawBenchmarkResult) -> Result<Self> {
        let metrics = match raw.status {
            Status::Fail => None,
            Status::Pass => {
                let duration_ms = raw.duration_ms.ok_or_else(|| ValidationError::MissingMetric {
                    test_id: raw.test_id.clone(),
                    field: "duration_ms",
                })?;
                let output_size_bytes =
                    raw.output_size_bytes
                        .ok_or_else(|| ValidationError::MissingMetric {
                            test_id: raw.test_id.clone(),
                            field: "output_size_bytes",
                        })?;
                Some(PassMetrics::new(
                    duration_ms,
                    output_size_bytes,
                    raw.output_lines.unwrap_or(0),
                ))
            }
        };

        Self::build(
            raw.test_id,
            raw.test_name,
            raw.category,
            raw.complexity,
            metrics,
        )
    }
}

impl From<BenchmarkResult> for RawBenchmarkResult {
    fn from(result: BenchmarkResult) -> Self {
        let status = result.status();
        Self {
            test_id: result.test_id,
            test_name: result.test_name,
            category: result.category,
            complexity: result.complexity,
            status,
            duration_ms: result.metrics.map(|m| m.duration_ms),
            output_size_bytes: result.metrics.map(|m| m.output_size_bytes),
            output_lines: result.metrics.map(|m| m.output_lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complexity_parsing() {
        assert_eq!(Complexity::from("Simple"), Complexity::Simple);
        assert_eq!(Complexity::from("Medium"), Complexity::Medium);
        assert_eq!(Complexity::from("Complex"), Complexity::Complex);
        assert_eq!(
            Complexity::from("Extreme"),
            Complexity::Other("Extreme".to_string())
        );
        assert!(!Complexity::from("simple").is_tier());
    }

    #[test]
    fn test_complexity_ordering() {
        let mut labels = vec![
            Complexity::from("Zeta"),
            Complexity::Complex,
            Complexity::Simple,
            Complexity::Medium,
        ];
        labels.sort();
        assert_eq!(
            labels,
            vec![
                Complexity::Simple,
                Complexity::Medium,
                Complexity::Complex,
                Complexity::Other("Zeta".to_string()),
            ]
        );
    }

    #[test]
    fn test_deserialize_passed_record() {
        let value = json!({
            "test_id": "T001",
            "test_name": "Find struct definition",
            "category": "symbols",
            "complexity": "Simple",
            "status": "PASS",
            "duration_ms": 12.5,
            "output_size_bytes": 420,
            "output_lines": 7,
            "query": "ignored extra field"
        });

        let result: BenchmarkResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.test_id(), "T001");
        assert_eq!(result.status(), Status::Pass);
        assert_eq!(result.metrics(), Some(&PassMetrics::new(12.5, 420, 7)));
    }

    #[test]
    fn test_deserialize_failed_record_without_metrics() {
        let value = json!({
            "test_id": "T002",
            "test_name": "Regex search",
            "category": "search",
            "complexity": "Medium",
            "status": "FAIL"
        });

        let result: BenchmarkResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.status(), Status::Fail);
        assert!(result.metrics().is_none());
    }

    #[test]
    fn test_failed_record_ignores_metrics() {
        let value = json!({
            "test_id": "T003",
            "test_name": "Timeout",
            "category": "search",
            "complexity": "Complex",
            "status": "FAIL",
            "duration_ms": -1.0,
            "output_size_bytes": null
        });

        let result: BenchmarkResult = serde_json::from_value(value).unwrap();
        assert!(result.metrics().is_none());
    }

    #[test]
    fn test_passed_record_requires_duration() {
        let value = json!({
            "test_id": "T004",
            "test_name": "Missing duration",
            "category": "search",
            "complexity": "Simple",
            "status": "PASS",
            "output_size_bytes": 10
        });

        let err = serde_json::from_value::<BenchmarkResult>(value).unwrap_err();
        assert!(err.to_string().contains("duration_ms"));
    }

    #[test]
    fn test_output_lines_defaults_to_zero() {
        let value = json!({
            "test_id": "T005",
            "test_name": "No line count",
            "category": "search",
            "complexity": "Simple",
            "status": "PASS",
            "duration_ms": 3,
            "output_size_bytes": 10
        });

        let result: BenchmarkResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.metrics().unwrap().output_lines, 0);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let value = json!({
            "test_id": "T006",
            "test_name": "Skipped",
            "category": "search",
            "complexity": "Simple",
            "status": "SKIP"
        });

        assert!(serde_json::from_value::<BenchmarkResult>(value).is_err());
    }

    #[test]
    fn test_constructor_validation() {
        assert_eq!(
            BenchmarkResult::failed("  ", "name", "cat", "Simple"),
            Err(ValidationError::EmptyField("test_id"))
        );
        assert_eq!(
            BenchmarkResult::failed("T1", "", "cat", "Simple"),
            Err(ValidationError::EmptyField("test_name"))
        );
        assert!(matches!(
            BenchmarkResult::passed("T1", "name", "cat", "Simple", PassMetrics::new(-5.0, 0, 0)),
            Err(ValidationError::InvalidDuration { .. })
        ));
        assert!(matches!(
            BenchmarkResult::passed("T1", "name", "cat", "Simple", PassMetrics::new(f64::NAN, 0, 0)),
            Err(ValidationError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_serialize_keeps_wire_shape() {
        let result = BenchmarkResult::passed(
            "T007",
            "Find callers",
            "references",
            "Extreme",
            PassMetrics::new(40.0, 2048, 30),
        )
        .unwrap();

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "PASS");
        assert_eq!(value["complexity"], "Extreme");
        assert_eq!(value["output_size_bytes"], 2048);

        let failed = BenchmarkResult::failed("T008", "Broken", "references", "Simple").unwrap();
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["status"], "FAIL");
        assert!(value.get("duration_ms").is_none());
    }
}
