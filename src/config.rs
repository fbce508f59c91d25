//! Engine configuration.
//!
//! Tuning knobs for the combination search and ranking. Defaults match
//! the behaviour expected by the timetable UI; load overrides from TOML
//! to change them without code changes.
//!
//! # Examples
//!
//! ```
//! use u_timetable::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     max_raw_results = 500
//!     max_ranked_results = 20
//!     time_limit_ms = 2000
//! "#).unwrap();
//!
//! assert_eq!(config.max_raw_results, 500);
//! assert_eq!(config.credit_tolerance, 2);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Search and ranking parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Credits a precise-mode schedule may exceed the target by.
    pub credit_tolerance: u32,
    /// Width of the recommendation credit window `[target - w, target]`.
    pub recommendation_window: u32,
    /// Stop the search after this many accepted schedules.
    pub max_raw_results: usize,
    /// Ranked schedules returned in precise mode.
    pub max_ranked_results: usize,
    /// Search-node budget per request. `None` = unlimited.
    pub max_nodes: Option<u64>,
    /// Wall-clock budget per request (ms). `None` = unlimited.
    pub time_limit_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            credit_tolerance: 2,
            recommendation_window: 3,
            max_raw_results: 200,
            max_ranked_results: 50,
            max_nodes: Some(200_000),
            time_limit_ms: None,
        }
    }
}

impl EngineConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks that the caps leave room for at least one result.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_raw_results == 0 {
            return Err(ConfigError::Invalid("max_raw_results must be positive".into()));
        }
        if self.max_ranked_results == 0 {
            return Err(ConfigError::Invalid(
                "max_ranked_results must be positive".into(),
            ));
        }
        if self.max_nodes == Some(0) {
            return Err(ConfigError::Invalid("max_nodes must be positive".into()));
        }
        Ok(())
    }

    /// Wall-clock limit as a duration.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn with_credit_tolerance(mut self, tolerance: u32) -> Self {
        self.credit_tolerance = tolerance;
        self
    }

    pub fn with_recommendation_window(mut self, window: u32) -> Self {
        self.recommendation_window = window;
        self
    }

    pub fn with_max_raw_results(mut self, cap: usize) -> Self {
        self.max_raw_results = cap;
        self
    }

    pub fn with_max_ranked_results(mut self, cap: usize) -> Self {
        self.max_ranked_results = cap;
        self
    }

    pub fn with_max_nodes(mut self, budget: Option<u64>) -> Self {
        self.max_nodes = budget;
        self
    }

    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit_ms = limit.map(|d| d.as_millis() as u64);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.credit_tolerance, 2);
        assert_eq!(config.recommendation_window, 3);
        assert_eq!(config.max_raw_results, 200);
        assert_eq!(config.max_ranked_results, 50);
        assert_eq!(config.max_nodes, Some(200_000));
        assert!(config.time_limit().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("credit_tolerance = 0").unwrap();
        assert_eq!(config.credit_tolerance, 0);
        assert_eq!(config.max_raw_results, 200);
    }

    #[test]
    fn test_empty_toml() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_time_limit() {
        let config = EngineConfig::from_toml_str("time_limit_ms = 1500").unwrap();
        assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));

        let config = EngineConfig::default().with_time_limit(Some(Duration::from_secs(2)));
        assert_eq!(config.time_limit_ms, Some(2000));
    }

    #[test]
    fn test_invalid_caps() {
        let err = EngineConfig::from_toml_str("max_raw_results = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EngineConfig::from_toml_str("max_nodes = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineConfig::from_toml_str("max_raw_results = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load("/nonexistent/u-timetable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
