// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! I/O operations for benchmark results.
//!
//! This module reads result files produced by the benchmark harness and can
//! write a result set back in the same format.

use benchlens_core::{BenchmarkResult, ResultSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading a results file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not exist
    #[error("Results file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file holds an empty array
    #[error("No results found in {}", .0.display())]
    Empty(PathBuf),

    /// The file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The file is not a JSON array of objects
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A record is missing fields or failed validation
    #[error("Invalid result at index {index} in {}: {source}", .path.display())]
    Invalid {
        /// File being parsed
        path: PathBuf,
        /// Zero-based position of the record
        index: usize,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Read and validate results from a JSON file.
///
/// The file must contain a non-empty JSON array of result objects.
pub fn load_results(path: impl AsRef<Path>) -> Result<ResultSet> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let results = parse_results(&content, path)?;
    info!(path = %path.display(), records = results.len(), "Loaded benchmark results");
    Ok(results)
}

/// Parse results from JSON text; `origin` is only used in error messages.
pub fn parse_results(content: &str, origin: &Path) -> Result<ResultSet> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|source| LoadError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

    if values.is_empty() {
        return Err(LoadError::Empty(origin.to_path_buf()));
    }

    let results = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<BenchmarkResult>(value).map_err(|source| LoadError::Invalid {
                path: origin.to_path_buf(),
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(passed = results.iter().filter(|r| r.is_passed()).count(), "Validated records");
    Ok(ResultSet::new(results))
}

/// Write a result set as a pretty-printed JSON array.
pub fn write_results_json(results: &ResultSet, path: impl AsRef<Path>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(results).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchlens_core::PassMetrics;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"[
        {"test_id": "T1", "test_name": "one", "category": "symbols", "complexity": "Simple",
         "status": "PASS", "duration_ms": 100, "output_size_bytes": 400, "output_lines": 4},
        {"test_id": "T2", "test_name": "two", "category": "search", "complexity": "Medium",
         "status": "FAIL", "error": "timeout"}
    ]"#;

    #[test]
    fn test_load_results() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(&path, SAMPLE).unwrap();

        let results = load_results(&path).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results.passed_count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_results(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_empty_array() {
        let err = parse_results("[]", Path::new("empty.json")).unwrap_err();
        assert!(matches!(err, LoadError::Empty(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_results("{not json", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));

        let err = parse_results(r#"{"test_id": "T1"}"#, Path::new("object.json")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_invalid_record_reports_index() {
        let content = r#"[
            {"test_id": "T1", "test_name": "one", "category": "a", "complexity": "Simple", "status": "FAIL"},
            {"test_id": "T2", "test_name": "two", "category": "a", "complexity": "Simple", "status": "PASS"}
        ]"#;

        let err = parse_results(content, Path::new("r.json")).unwrap_err();
        match err {
            LoadError::Invalid { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let results: ResultSet = vec![
            BenchmarkResult::passed("T1", "one", "a", "Complex", PassMetrics::new(5.5, 64, 2)).unwrap(),
            BenchmarkResult::failed("T2", "two", "b", "Odd").unwrap(),
        ]
        .into();

        write_results_json(&results, &path).unwrap();
        assert_eq!(load_results(&path).unwrap(), results);
    }
}
