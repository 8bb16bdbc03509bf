// ABOUTME: Error types for the vision interpretation service
// ABOUTME: Re-exports the core error taxonomy so callers depend on one path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Two families of errors exist:
//!
//! - [`InterpretationError`] classifies why vendor output could not be used.
//!   The pipeline absorbs every variant into a fallback reason; none of them
//!   reach callers as `Err`.
//! - [`AppError`] and [`ConfigError`] cover startup: missing API keys,
//!   malformed environment variables, invalid fallback tables.

pub use pierre_vision_core::errors::{
    AppError, AppResult, ConfigError, ErrorCode, InterpretationError,
};
