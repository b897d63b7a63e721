// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! Estimator configuration.
//!
//! Every heuristic constant of the token-cost model lives here so it can be
//! tuned from a file or the environment without touching the formulas.
//!
//! # Sources
//!
//! Values are layered, later sources winning:
//!
//! 1. Built-in defaults ([`EstimatorConfig::default`])
//! 2. An optional configuration file (TOML, YAML or JSON by extension)
//! 3. Environment variables prefixed with `BENCHLENS__`, nested keys
//!    separated by `__` (e.g. `BENCHLENS__MULTIPLIERS__COMPLEX=4.0`)

use benchlens_core::Complexity;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "BENCHLENS";

/// Errors that can occur while loading estimator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Source(#[from] ::config::ConfigError),

    /// A value is outside its permitted range
    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid {
        /// Offending key
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Baseline tool calls needed to replace one measured call, per complexity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityMultipliers {
    /// Multiplier for simple tasks
    pub simple: f64,
    /// Multiplier for medium tasks
    pub medium: f64,
    /// Multiplier for complex tasks
    pub complex: f64,
    /// Multiplier for any complexity outside the fixed tiers
    pub default: f64,
}

impl Default for ComplexityMultipliers {
    fn default() -> Self {
        Self {
            simple: 1.5,
            medium: 2.5,
            complex: 5.0,
            default: 2.0,
        }
    }
}

impl ComplexityMultipliers {
    /// Multiplier for the given complexity.
    pub fn for_complexity(&self, complexity: &Complexity) -> f64 {
        match complexity {
            Complexity::Simple => self.simple,
            Complexity::Medium => self.medium,
            Complexity::Complex => self.complex,
            Complexity::Other(_) => self.default,
        }
    }
}

/// Heuristic constants of the token-cost model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Characters per token
    pub chars_per_token: f64,
    /// Fixed token cost of every tool invocation
    pub tool_call_overhead: f64,
    /// How much larger baseline tool output is, in characters
    pub baseline_verbosity: f64,
    /// Baseline calls per measured call, by complexity
    pub multipliers: ComplexityMultipliers,
    /// User prompt tokens per conversational turn
    pub user_prompt_tokens: f64,
    /// Assistant reasoning tokens per turn for the measured tool
    pub reasoning_tokens: f64,
    /// Assistant response tokens per turn for the measured tool
    pub response_tokens: f64,
    /// Scale applied to reasoning tokens for the baseline tool
    pub baseline_reasoning_factor: f64,
    /// Scale applied to response tokens for the baseline tool
    pub baseline_response_factor: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            chars_per_token: 4.0,
            tool_call_overhead: 50.0,
            baseline_verbosity: 1.8,
            multipliers: ComplexityMultipliers::default(),
            user_prompt_tokens: 25.0,
            reasoning_tokens: 120.0,
            response_tokens: 80.0,
            baseline_reasoning_factor: 1.5,
            baseline_response_factor: 1.2,
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading estimator configuration file");
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the estimator.
    pub fn validate(&self) -> Result<()> {
        if !(self.chars_per_token.is_finite() && self.chars_per_token > 0.0) {
            return Err(ConfigError::Invalid {
                key: "chars_per_token",
                reason: format!("must be a positive number, got {}", self.chars_per_token),
            });
        }

        let non_negative = [
            ("tool_call_overhead", self.tool_call_overhead),
            ("baseline_verbosity", self.baseline_verbosity),
            ("multipliers.simple", self.multipliers.simple),
            ("multipliers.medium", self.multipliers.medium),
            ("multipliers.complex", self.multipliers.complex),
            ("multipliers.default", self.multipliers.default),
            ("user_prompt_tokens", self.user_prompt_tokens),
            ("reasoning_tokens", self.reasoning_tokens),
            ("response_tokens", self.response_tokens),
            ("baseline_reasoning_factor", self.baseline_reasoning_factor),
            ("baseline_response_factor", self.baseline_response_factor),
        ];

        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("must be a finite, non-negative number, got {}", value),
                });
            }
        }

        Ok(())
    }

    /// Reasoning tokens per turn assumed for the baseline tool.
    pub fn baseline_reasoning_tokens(&self) -> f64 {
        self.reasoning_tokens * self.baseline_reasoning_factor
    }

    /// Response tokens per turn assumed for the baseline tool.
    pub fn baseline_response_tokens(&self) -> f64 {
        self.response_tokens * self.baseline_response_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EstimatorConfig::default();
        assert_eq!(config.chars_per_token, 4.0);
        assert_eq!(config.tool_call_overhead, 50.0);
        assert_eq!(config.baseline_verbosity, 1.8);
        assert_eq!(config.baseline_reasoning_tokens(), 180.0);
        assert!((config.baseline_response_tokens() - 96.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_multiplier_lookup() {
        let multipliers = ComplexityMultipliers::default();
        assert_eq!(multipliers.for_complexity(&Complexity::Simple), 1.5);
        assert_eq!(multipliers.for_complexity(&Complexity::Medium), 2.5);
        assert_eq!(multipliers.for_complexity(&Complexity::Complex), 5.0);
        assert_eq!(multipliers.for_complexity(&Complexity::from("Huge")), 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EstimatorConfig {
            chars_per_token: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "chars_per_token", .. })
        ));

        let mut config = EstimatorConfig::default();
        config.multipliers.complex = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "multipliers.complex", .. })
        ));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "baseline_verbosity = 2.0").unwrap();
        writeln!(file, "[multipliers]").unwrap();
        writeln!(file, "complex = 4.0").unwrap();

        let config = EstimatorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.baseline_verbosity, 2.0);
        assert_eq!(config.multipliers.complex, 4.0);
        assert_eq!(config.multipliers.simple, 1.5);
        assert_eq!(config.chars_per_token, 4.0);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "chars_per_token = -2.0").unwrap();

        assert!(matches!(
            EstimatorConfig::load(Some(file.path())),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = EstimatorConfig::load(Some(Path::new("/nonexistent/benchlens.toml")));
        assert!(matches!(result, Err(ConfigError::Source(_))));
    }
}
