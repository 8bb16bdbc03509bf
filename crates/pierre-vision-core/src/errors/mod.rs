// ABOUTME: Unified error handling for the vision interpretation layer
// ABOUTME: Application error codes plus the interpretation and configuration taxonomies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Two families of errors live here:
//!
//! - [`InterpretationError`] classifies why vendor output could not be used as-is.
//!   Apart from `Unknown`, these are absorbed by the pipeline and resolved through
//!   fallback synthesis; they only ever surface as a `reason` string.
//! - [`AppError`] with an [`ErrorCode`] covers startup and configuration failures
//!   (missing API key, invalid fallback tables) that callers must handle.

mod config;
mod interpretation;

pub use config::ConfigError;
pub use interpretation::InterpretationError;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Configuration (6000-6999)
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration is present but invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::ConfigMissing | Self::ConfigInvalid | Self::InternalError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Unified error type for startup and configuration failures
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::ConfigMissing.http_status(), 500);
        assert_eq!(ErrorCode::ConfigInvalid.http_status(), 500);
        assert_eq!(AppError::internal("client build failed").http_status(), 500);
    }

    #[test]
    fn test_error_code_wire_names() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::ConfigMissing).ok().as_deref(),
            Some("\"CONFIG_MISSING\"")
        );
        assert_eq!(
            AppError::new(ErrorCode::ConfigMissing, "GEMINI_API_KEY").to_string(),
            "Required configuration is missing: GEMINI_API_KEY"
        );
    }

    #[test]
    fn test_config_error_conversion_keeps_source() {
        let error = AppError::from(ConfigError::InvalidRange("time band hours"));
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("time band hours"));
    }
}
