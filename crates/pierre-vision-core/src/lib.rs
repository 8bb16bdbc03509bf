// ABOUTME: Core types and constants for the Pierre vision interpretation layer
// ABOUTME: Foundation crate with the error taxonomy, canonical domain records, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Vision Core
//!
//! Foundation crate shared by the interpretation pipeline and its callers.
//! It owns the types that cross the pipeline boundary and is designed to
//! change infrequently.
//!
//! ## Modules
//!
//! - **errors**: `InterpretationError` taxonomy, `ConfigError`, and the `AppError`/`ErrorCode` pair
//! - **models**: canonical `DomainRecord` variants and the outbound `ResultEnvelope`
//! - **constants**: confidence constants and biometric thresholds

/// Error taxonomy and application error type
pub mod errors;

/// Canonical domain records produced by the interpretation pipeline
pub mod models;

/// Confidence constants and biometric thresholds
pub mod constants;
