// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core data model for benchlens.
//!
//! This crate provides the validated benchmark record types consumed by the
//! analysis engine.
//!
//! # Modules
//!
//! - [`result`] - The `BenchmarkResult` record, its status and complexity
//! - [`result_set`] - The ordered `ResultSet` collection
//! - [`error`] - Validation errors

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod result;
pub mod result_set;

pub use error::ValidationError;
pub use result::{BenchmarkResult, Complexity, PassMetrics, Status};
pub use result_set::ResultSet;
