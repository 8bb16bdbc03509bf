// ABOUTME: Integration tests for environment-driven vision configuration
// ABOUTME: Defaults, overrides, parse errors, range checks, and the retry attempt cap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use pierre_vision::config::{RetrySettings, TransportConfig, VisionConfig};
use pierre_vision::errors::{AppError, ConfigError, ErrorCode};
use pierre_vision::logging::{LogFormat, LoggingConfig};
use serial_test::serial;

const ALL_VARS: &[&str] = &[
    TransportConfig::API_KEY_ENV,
    TransportConfig::MODEL_ENV,
    TransportConfig::BASE_URL_ENV,
    TransportConfig::TIMEOUT_ENV,
    TransportConfig::TEMPERATURE_ENV,
    RetrySettings::MAX_ATTEMPTS_ENV,
    RetrySettings::BASE_DELAY_ENV,
    VisionConfig::FALLBACK_TABLES_ENV,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

// ============================================================================
// Defaults and overrides
// ============================================================================

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = VisionConfig::from_env().unwrap();

    assert!(config.transport.api_key.is_none());
    assert_eq!(config.transport.model, "gemini-2.5-flash");
    assert_eq!(config.transport.timeout_secs, 60);
    assert_eq!(config.retry, RetrySettings::default());
    assert_eq!(config.retry.max_attempts, 3);
    assert!(config.fallback_tables_path.is_none());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(TransportConfig::API_KEY_ENV, "test-key");
    env::set_var(TransportConfig::MODEL_ENV, "gemini-2.0-flash");
    env::set_var(TransportConfig::TIMEOUT_ENV, " 15 ");
    env::set_var(TransportConfig::TEMPERATURE_ENV, "0.7");
    env::set_var(RetrySettings::BASE_DELAY_ENV, "250");
    env::set_var(VisionConfig::FALLBACK_TABLES_ENV, "/etc/pierre/tables.json");

    let config = VisionConfig::from_env().unwrap();

    assert_eq!(config.transport.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.transport.model, "gemini-2.0-flash");
    assert_eq!(config.transport.timeout_secs, 15);
    assert!((config.transport.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.retry.base_delay_ms, 250);
    assert_eq!(
        config.fallback_tables_path.as_deref(),
        Some(std::path::Path::new("/etc/pierre/tables.json"))
    );

    clear_env();
}

#[test]
#[serial]
fn test_blank_values_use_defaults() {
    clear_env();
    env::set_var(TransportConfig::API_KEY_ENV, "   ");
    env::set_var(TransportConfig::MODEL_ENV, "");
    env::set_var(RetrySettings::MAX_ATTEMPTS_ENV, " ");

    let config = VisionConfig::from_env().unwrap();

    assert!(config.transport.api_key.is_none());
    assert_eq!(config.transport.model, "gemini-2.5-flash");
    assert_eq!(config.retry.max_attempts, 3);

    clear_env();
}

#[test]
#[serial]
fn test_serialized_config_omits_api_key() {
    clear_env();
    env::set_var(TransportConfig::API_KEY_ENV, "super-secret");

    let config = VisionConfig::from_env().unwrap();
    let rendered = serde_json::to_string(&config).unwrap();
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("gemini-2.5-flash"));

    clear_env();
}

// ============================================================================
// Retry budget
// ============================================================================

#[test]
#[serial]
fn test_attempts_capped_at_three() {
    clear_env();
    env::set_var(RetrySettings::MAX_ATTEMPTS_ENV, "10");

    let settings = RetrySettings::from_env().unwrap();
    assert_eq!(settings.max_attempts, 3);

    env::set_var(RetrySettings::MAX_ATTEMPTS_ENV, "2");
    assert_eq!(RetrySettings::from_env().unwrap().max_attempts, 2);

    clear_env();
}

#[test]
#[serial]
fn test_zero_attempts_rejected() {
    clear_env();
    env::set_var(RetrySettings::MAX_ATTEMPTS_ENV, "0");

    let error = RetrySettings::from_env().unwrap_err();
    assert!(matches!(error, ConfigError::ValueOutOfRange(_)));

    clear_env();
}

// ============================================================================
// Invalid values
// ============================================================================

#[test]
#[serial]
fn test_unparsable_number_names_variable() {
    clear_env();
    env::set_var(TransportConfig::TIMEOUT_ENV, "soon");

    let error = VisionConfig::from_env().unwrap_err();
    let ConfigError::Parse(message) = error else {
        panic!("expected parse error, got {error:?}");
    };
    assert!(message.starts_with("PIERRE_VISION_TIMEOUT_SECS=soon"));

    clear_env();
}

#[test]
#[serial]
fn test_out_of_range_values_rejected() {
    clear_env();
    env::set_var(TransportConfig::TIMEOUT_ENV, "0");
    assert!(matches!(
        TransportConfig::from_env(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    env::set_var(TransportConfig::TIMEOUT_ENV, "30");
    env::set_var(TransportConfig::TEMPERATURE_ENV, "-0.5");
    assert!(matches!(
        TransportConfig::from_env(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    clear_env();
}

#[test]
#[serial]
fn test_config_error_maps_to_app_error() {
    clear_env();
    env::set_var(RetrySettings::BASE_DELAY_ENV, "-1");

    let error: AppError = VisionConfig::from_env().unwrap_err().into();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);

    clear_env();
}

// ============================================================================
// Logging configuration
// ============================================================================

#[test]
#[serial]
fn test_logging_config_from_environment() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");

    let config = LoggingConfig::from_env();
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(config.include_spans);

    env::remove_var("LOG_FORMAT");
    env::remove_var("ENVIRONMENT");
}
