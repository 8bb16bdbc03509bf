// ABOUTME: Main library entry point for the Pierre vision interpretation layer
// ABOUTME: Turns generative vendor output for photos and voice notes into validated fitness records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Vision
//!
//! Resilient interpretation of generative model output for photo and voice
//! logging: food photos, body photos, spoken workouts, and spoken meals.
//!
//! Vendor replies are treated as untrusted text. The pipeline extracts the
//! text from the vendor envelope, recovers a JSON object through a series of
//! increasingly lenient stages, coerces it into a canonical record, and
//! validates it. When any step fails the record is synthesized from the
//! request context and lookup tables instead, so callers always receive a
//! [`ResultEnvelope`](pierre_vision_core::models::ResultEnvelope) with a
//! record unless synthesis itself is impossible.
//!
//! ## Architecture
//!
//! - **llm**: vendor transport trait, Gemini implementation, retry policy, prompts
//! - **interpretation**: envelope extraction, JSON recovery, coercion, validation, fallback
//! - **services**: request orchestration for the four record kinds
//! - **config**: environment-driven settings
//! - **logging**: structured logging setup
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pierre_vision::interpretation::{FoodPhotoSchema, InterpretationContext, ResponseInterpreter};
//! use pierre_vision_core::models::MealType;
//!
//! let local_time = NaiveDate::from_ymd_opt(2025, 3, 14)
//!     .and_then(|d| d.and_hms_opt(13, 5, 0))
//!     .unwrap_or_default();
//! let ctx = InterpretationContext::at(local_time).with_meal_type(Some(MealType::Lunch));
//! let result = ResponseInterpreter::global().interpret_text::<FoodPhotoSchema>("```json\n{}\n```", &ctx);
//! assert!(result.success);
//! assert!(result.is_fallback);
//! ```

/// Environment-driven configuration
pub mod config;

/// Error types
pub mod errors;

/// Vendor output interpretation pipeline
pub mod interpretation;

/// Vendor transport, retry policy, and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Request orchestration
pub mod services;

pub use pierre_vision_core::models;
