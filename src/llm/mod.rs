// ABOUTME: Transport abstraction for multimodal generation requests to a vendor model
// ABOUTME: Defines VisionTransport, request and media payload types, and transport errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Vision Transport Interface
//!
//! The interpretation layer never talks HTTP itself. A [`VisionTransport`]
//! sends one [`GenerationRequest`] (prompt plus optional photo or audio) and
//! hands back the vendor's raw envelope, or a [`TransportError`] that the
//! pipeline turns into a fallback reason.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pierre_vision::llm::{GeminiTransport, GenerationRequest, MediaPayload, VisionTransport};
//! use pierre_vision::config::VisionConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VisionConfig::from_env()?;
//! let transport = GeminiTransport::from_config(&config.transport)?;
//! let photo = MediaPayload::from_bytes("image/jpeg", &std::fs::read("lunch.jpg")?);
//! let request = GenerationRequest::new("Describe the meal").with_media(photo);
//! let envelope = transport.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

mod gemini;
pub mod prompts;
mod retry;

pub use gemini::GeminiTransport;
pub use retry::{RetryPolicy, MAX_ATTEMPTS_CAP};

use std::fmt;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pierre_vision_core::errors::InterpretationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interpretation::RawEnvelope;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// Input and output features a transport supports
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransportCapabilities: u8 {
        /// Accepts image parts
        const VISION = 0b0000_0001;
        /// Accepts audio parts
        const AUDIO = 0b0000_0010;
        /// Can be asked to answer with JSON only
        const JSON_MODE = 0b0000_0100;
    }
}

impl TransportCapabilities {
    /// Capabilities of a multimodal model
    #[must_use]
    pub const fn multimodal() -> Self {
        Self::VISION.union(Self::AUDIO).union(Self::JSON_MODE)
    }

    /// Whether media of the given kind can be sent
    #[must_use]
    pub const fn accepts(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Image => self.contains(Self::VISION),
            MediaKind::Audio => self.contains(Self::AUDIO),
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Broad class of an inline media attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Photo
    Image,
    /// Voice recording
    Audio,
}

/// Inline media attachment, base64-encoded
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPayload {
    /// MIME type, e.g. `image/jpeg` or `audio/ogg`
    pub mime_type: String,
    /// Base64 (standard alphabet) payload
    pub data: String,
}

impl MediaPayload {
    /// Encode raw bytes
    #[must_use]
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Wrap data that is already base64-encoded
    #[must_use]
    pub fn from_base64(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Image or audio, judged by MIME type; anything not `audio/*` counts as an image
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        if self.mime_type.starts_with("audio/") {
            MediaKind::Audio
        } else {
            MediaKind::Image
        }
    }
}

impl fmt::Debug for MediaPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaPayload")
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// One generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Instruction text
    pub prompt: String,
    /// Optional photo or voice recording
    pub media: Option<MediaPayload>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Ask the vendor for a JSON-only answer
    pub json_mode: bool,
}

impl GenerationRequest {
    /// Text-only request with JSON mode on
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            media: None,
            temperature: None,
            json_mode: true,
        }
    }

    /// Attach media
    #[must_use]
    pub fn with_media(mut self, media: MediaPayload) -> Self {
        self.media = Some(media);
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Ask for a JSON-only answer or leave the output format to the vendor
    #[must_use]
    pub const fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Class of transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection could not be established or was interrupted
    Network,
    /// No response within the configured timeout
    Timeout,
    /// Vendor answered with a non-success HTTP status
    Status(u16),
    /// Response body was not a vendor envelope
    Decode,
    /// Request can never succeed on this transport (missing capability, bad input)
    Unsupported,
}

/// Failure to obtain a vendor envelope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Failure class
    pub kind: TransportErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl TransportError {
    /// Build an error
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Network, timeout and 5xx failures may succeed on a later attempt
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self.kind {
            TransportErrorKind::Network | TransportErrorKind::Timeout => true,
            TransportErrorKind::Status(status) => matches!(status, 500..=599),
            TransportErrorKind::Decode | TransportErrorKind::Unsupported => false,
        }
    }
}

impl From<TransportError> for InterpretationError {
    fn from(error: TransportError) -> Self {
        Self::Transport {
            message: error.message,
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends generation requests to a vendor model
#[async_trait]
pub trait VisionTransport: Send + Sync {
    /// Short transport name for logs
    fn name(&self) -> &'static str;

    /// Supported media and output modes
    fn capabilities(&self) -> TransportCapabilities;

    /// Send one request and return the raw envelope
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no envelope could be obtained
    async fn generate(&self, request: &GenerationRequest) -> Result<RawEnvelope, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        let err = |kind| TransportError::new(kind, "x");
        assert!(err(TransportErrorKind::Network).is_retryable());
        assert!(err(TransportErrorKind::Timeout).is_retryable());
        assert!(err(TransportErrorKind::Status(503)).is_retryable());
        assert!(!err(TransportErrorKind::Status(429)).is_retryable());
        assert!(!err(TransportErrorKind::Status(400)).is_retryable());
        assert!(!err(TransportErrorKind::Decode).is_retryable());
    }

    #[test]
    fn media_kind_from_mime() {
        assert_eq!(MediaPayload::from_bytes("audio/ogg", b"x").kind(), MediaKind::Audio);
        assert_eq!(MediaPayload::from_bytes("image/png", b"x").kind(), MediaKind::Image);
        assert_eq!(MediaPayload::from_bytes("image/png", b"hi").data, "aGk=");
    }

    #[test]
    fn multimodal_accepts_both_kinds() {
        let caps = TransportCapabilities::multimodal();
        assert!(caps.accepts(MediaKind::Image));
        assert!(caps.accepts(MediaKind::Audio));
        assert!(!TransportCapabilities::VISION.accepts(MediaKind::Audio));
    }
}
