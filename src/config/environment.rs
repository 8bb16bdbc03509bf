// ABOUTME: Environment configuration for the vendor transport, retry policy, and fallback tables
// ABOUTME: Parses environment variables with defaults and range checks into typed settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use pierre_vision_core::errors::ConfigError;
use serde::Serialize;
use tracing::info;

use crate::interpretation::FallbackTables;
use crate::llm::MAX_ATTEMPTS_CAP;

// ============================================================================
// Transport
// ============================================================================

/// Vendor transport settings
#[derive(Clone, Serialize)]
pub struct TransportConfig {
    /// API key; never serialized
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Default model
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Default sampling temperature
    pub temperature: f32,
}

impl TransportConfig {
    /// API key variable
    pub const API_KEY_ENV: &'static str = "GEMINI_API_KEY";
    /// Model variable
    pub const MODEL_ENV: &'static str = "PIERRE_VISION_MODEL";
    /// Base URL variable
    pub const BASE_URL_ENV: &'static str = "PIERRE_VISION_BASE_URL";
    /// Timeout variable
    pub const TIMEOUT_ENV: &'static str = "PIERRE_VISION_TIMEOUT_SECS";
    /// Temperature variable
    pub const TEMPERATURE_ENV: &'static str = "PIERRE_VISION_TEMPERATURE";

    fn default_model() -> String {
        "gemini-2.5-flash".to_owned()
    }

    fn default_base_url() -> String {
        "https://generativelanguage.googleapis.com/v1beta".to_owned()
    }

    const fn default_timeout_secs() -> u64 {
        60
    }

    const fn default_temperature() -> f32 {
        0.2
    }

    /// Load from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or is out of range
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(Self::API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let config = Self {
            api_key,
            model: env_var_or(Self::MODEL_ENV, &Self::default_model()),
            base_url: env_var_or(Self::BASE_URL_ENV, &Self::default_base_url()),
            timeout_secs: env_parse_or(Self::TIMEOUT_ENV, Self::default_timeout_secs())?,
            temperature: env_parse_or(Self::TEMPERATURE_ENV, Self::default_temperature())?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValueOutOfRange`] for a zero timeout or a temperature outside 0..=2
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValueOutOfRange("timeout_secs must be positive"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValueOutOfRange("temperature must be within 0..=2"));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingField("model"));
        }
        Ok(())
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Self::default_model(),
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            temperature: Self::default_temperature(),
        }
    }
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

// ============================================================================
// Retry
// ============================================================================

/// Transport retry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetrySettings {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt, doubled after each retry
    pub base_delay_ms: u64,
}

impl RetrySettings {
    /// Attempt budget variable
    pub const MAX_ATTEMPTS_ENV: &'static str = "PIERRE_VISION_MAX_ATTEMPTS";
    /// Base delay variable
    pub const BASE_DELAY_ENV: &'static str = "PIERRE_VISION_RETRY_BASE_MS";

    /// Load from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable does not parse or the attempt budget is zero
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_attempts: u32 = env_parse_or(Self::MAX_ATTEMPTS_ENV, defaults.max_attempts)?;
        if max_attempts == 0 {
            return Err(ConfigError::ValueOutOfRange("max_attempts must be at least 1"));
        }
        Ok(Self {
            max_attempts: max_attempts.min(MAX_ATTEMPTS_CAP),
            base_delay_ms: env_parse_or(Self::BASE_DELAY_ENV, defaults.base_delay_ms)?,
        })
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS_CAP,
            base_delay_ms: 500,
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct VisionConfig {
    /// Vendor transport
    pub transport: TransportConfig,
    /// Retry policy
    pub retry: RetrySettings,
    /// JSON file replacing the built-in fallback tables
    pub fallback_tables_path: Option<PathBuf>,
}

impl VisionConfig {
    /// Fallback tables override variable
    pub const FALLBACK_TABLES_ENV: &'static str = "PIERRE_VISION_FALLBACK_TABLES";

    /// Load the whole configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns the first transport or retry configuration error
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            transport: TransportConfig::from_env()?,
            retry: RetrySettings::from_env()?,
            fallback_tables_path: env::var(Self::FALLBACK_TABLES_ENV)
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        };
        info!(
            model = %config.transport.model,
            max_attempts = config.retry.max_attempts,
            api_key_present = config.transport.api_key.is_some(),
            fallback_tables = ?config.fallback_tables_path,
            "Vision configuration loaded"
        );
        Ok(config)
    }

    /// Tables for this configuration: the override file when set, else the built-ins
    ///
    /// The override is installed as the process-wide table set.
    ///
    /// # Errors
    ///
    /// Returns an error if the override file cannot be read, fails validation,
    /// or tables were already installed
    pub fn load_fallback_tables(&self) -> Result<&'static FallbackTables, ConfigError> {
        match &self.fallback_tables_path {
            Some(path) => FallbackTables::install(FallbackTables::from_path(path)?),
            None => Ok(FallbackTables::global()),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| ConfigError::Parse(format!("{key}={value}: {e}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_defaults_validate() {
        let config = TransportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let config = TransportConfig {
            temperature: 3.5,
            ..TransportConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn debug_hides_api_key() {
        let config = TransportConfig {
            api_key: Some("top-secret".to_owned()),
            ..TransportConfig::default()
        };
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}
