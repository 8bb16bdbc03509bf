// ABOUTME: Resilient interpretation of generative vendor output into validated fitness records
// ABOUTME: Envelope extraction, JSON recovery, coercion, validation, and fallback synthesis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Interpretation
//!
//! Vendor output is untrusted: it may be wrapped in prose or code fences,
//! carry comments or trailing commas, be truncated, or be missing entirely.
//! This module turns whatever arrives into a [`ResultEnvelope`] holding a
//! record the rest of the platform can store without further checks.
//!
//! ```text
//! RawEnvelope -> extract_text -> recover_json -> coerce -> validate -> parsed
//!                                      |                      |
//!                                      +------- failure ------+-> synthesize -> fallback
//! ```
//!
//! [`ResultEnvelope`]: pierre_vision_core::models::ResultEnvelope

/// Field coercion helpers
pub mod coercion;
/// Request context
pub mod context;
/// Vendor envelope model and text extraction
pub mod envelope;
/// Fallback synthesis and lookup tables
pub mod fallback;
/// Generic pipeline
pub mod pipeline;
/// Staged JSON recovery
pub mod recovery;
/// Per-kind schemas
pub mod schema;
/// Domain validation
pub mod validation;

pub use context::InterpretationContext;
pub use envelope::{extract_text, ExtractedText, RawEnvelope};
pub use fallback::FallbackTables;
pub use pipeline::ResponseInterpreter;
pub use recovery::{recover_json, RecoveredJson, RecoveryStage};
pub use schema::{BodyPhotoSchema, FoodPhotoSchema, RecordSchema, VoiceFoodSchema, VoiceWorkoutSchema};
pub use validation::{validate_record, ValidationOutcome};
