// ABOUTME: Service layer orchestrating transport, retry, and interpretation per request
// ABOUTME: Protocol-agnostic entry points for photo and voice analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Service layer
//!
//! Entry points here are what a hosting API calls. They never return errors:
//! every outcome is a [`ResultEnvelope`](pierre_vision_core::models::ResultEnvelope).

/// Photo and voice analysis service
pub mod analysis;

pub use analysis::{AnalysisService, Clock, FixedClock, SystemClock};
