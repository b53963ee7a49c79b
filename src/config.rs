//! Configuration for scoring and breach lookup.
//!
//! Scoring weights and thresholds are plain values with defaults. The breach
//! endpoint, timeout and padding flag can also be read from the environment.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::types::StrengthCategory;

pub const ENDPOINT_ENV: &str = "PWD_HIBP_ENDPOINT";
pub const TIMEOUT_ENV: &str = "PWD_HIBP_TIMEOUT_SECS";
pub const PADDING_ENV: &str = "PWD_HIBP_ADD_PADDING";

pub const DEFAULT_ENDPOINT: &str = "https://api.pwnedpasswords.com/range/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid range endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Invalid timeout (expected positive whole seconds): {0}")]
    InvalidTimeout(String),
    #[error("Invalid boolean flag: {0}")]
    InvalidFlag(String),
}

/// Weights and thresholds used by the strength scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Length at which the length sub-score saturates.
    pub target_length: usize,
    pub length_weight: f64,
    /// Characters of a class counted before the class sub-score saturates.
    pub class_cap: usize,
    /// Points per counted character of a class.
    pub class_weight: f64,
    pub strong_threshold: f64,
    pub moderate_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            target_length: 8,
            length_weight: 40.0,
            class_cap: 2,
            class_weight: 10.0,
            strong_threshold: 80.0,
            moderate_threshold: 50.0,
        }
    }
}

impl ScoringConfig {
    /// Maps a total score to its category, checking the highest band first.
    pub fn category_for(&self, score: f64) -> StrengthCategory {
        if score >= self.strong_threshold {
            StrengthCategory::Strong
        } else if score >= self.moderate_threshold {
            StrengthCategory::Moderate
        } else {
            StrengthCategory::Weak
        }
    }
}

/// Settings for the k-anonymity range lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachConfig {
    /// Base URL; the 5-character hash prefix is appended to it.
    pub endpoint: String,
    pub timeout: Duration,
    /// Ask the API to pad responses with zero-count records.
    pub add_padding: bool,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            add_padding: false,
        }
    }
}

impl BreachConfig {
    /// Builds a configuration from the environment.
    ///
    /// Priority for each setting:
    /// 1. Environment variable (`PWD_HIBP_ENDPOINT`, `PWD_HIBP_TIMEOUT_SECS`,
    ///    `PWD_HIBP_ADD_PADDING`)
    /// 2. Built-in default
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config = config.with_endpoint(endpoint)?;
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            config.timeout = parse_timeout(&timeout)?;
        }
        if let Ok(flag) = std::env::var(PADDING_ENV) {
            config.add_padding = parse_flag(&flag)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Breach config: endpoint={}, timeout={:?}, padding={}",
            config.endpoint,
            config.timeout,
            config.add_padding
        );

        Ok(config)
    }

    /// Replaces the endpoint, validating it and appending a trailing `/`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let mut endpoint = endpoint.into().trim().to_string();

        let parsed =
            Url::parse(&endpoint).map_err(|_| ConfigError::InvalidEndpoint(endpoint.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        self.endpoint = endpoint;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_padding(mut self, add_padding: bool) -> Self {
        self.add_padding = add_padding;
        self
    }

    /// Full request URL for a hash prefix.
    pub fn range_url(&self, prefix: &str) -> String {
        format!("{}{}", self.endpoint, prefix)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(raw.to_string())),
    }
}
