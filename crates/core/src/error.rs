// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Validation errors raised while constructing benchmark records.

use thiserror::Error;

/// Errors that can occur when a benchmark record fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required identifier was empty or whitespace
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    /// A passed record did not carry one of its required metrics
    #[error("passed result `{test_id}` is missing `{field}`")]
    MissingMetric {
        /// Identifier of the offending record
        test_id: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// Duration was negative, NaN or infinite
    #[error("duration of `{test_id}` must be a finite, non-negative number of milliseconds (got {value})")]
    InvalidDuration {
        /// Identifier of the offending record
        test_id: String,
        /// Value that was rejected
        value: f64,
    },
}

/// Result type for record validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
