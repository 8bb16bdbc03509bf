// ABOUTME: Configuration management for the vision interpretation service
// ABOUTME: Environment-driven transport, retry, and fallback table settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration
//!
//! All settings come from environment variables with documented defaults:
//!
//! | Variable | Default |
//! |---|---|
//! | `GEMINI_API_KEY` | required by the Gemini transport |
//! | `PIERRE_VISION_MODEL` | `gemini-2.5-flash` |
//! | `PIERRE_VISION_BASE_URL` | `https://generativelanguage.googleapis.com/v1beta` |
//! | `PIERRE_VISION_TIMEOUT_SECS` | `60` |
//! | `PIERRE_VISION_TEMPERATURE` | `0.2` |
//! | `PIERRE_VISION_MAX_ATTEMPTS` | `3` (capped at 3) |
//! | `PIERRE_VISION_RETRY_BASE_MS` | `500` |
//! | `PIERRE_VISION_FALLBACK_TABLES` | built-in tables |

/// Environment-backed settings
pub mod environment;

pub use environment::{RetrySettings, TransportConfig, VisionConfig};
