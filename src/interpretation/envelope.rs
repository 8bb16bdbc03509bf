// ABOUTME: Vendor response envelope model and extraction of the generated text
// ABOUTME: Walks candidates/content/parts/text and reports which level was missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_vision_core::errors::InterpretationError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Raw vendor response envelope
///
/// Every level is optional so that malformed envelopes still deserialize and
/// the extractor can name what is missing. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnvelope {
    /// Generated candidates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    /// Error object some vendors return alongside or instead of candidates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<VendorError>,
}

/// One generated candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<CandidateContent>,
    /// Why generation stopped (`STOP`, `MAX_TOKENS`, `SAFETY`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Content of a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateContent {
    /// Content parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<ContentPart>>,
    /// Producer role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One content part; non-text parts deserialize with `text: None`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    /// Generated text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Vendor error object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorError {
    /// Numeric code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Status name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RawEnvelope {
    /// Envelope holding a single text candidate
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![ContentPart {
                        text: Some(text.into()),
                    }]),
                    role: Some("model".to_owned()),
                }),
                finish_reason: Some("STOP".to_owned()),
            }]),
            error: None,
        }
    }
}

/// Text taken from an envelope; empty when the envelope was malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    defect: Option<InterpretationError>,
}

impl ExtractedText {
    /// Generated text, possibly empty
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Envelope defect, when the text could not be located
    #[must_use]
    pub const fn envelope_error(&self) -> Option<&InterpretationError> {
        self.defect.as_ref()
    }
}

/// First text part of the first candidate
///
/// Missing nesting yields empty text plus an [`InterpretationError::Envelope`]
/// naming the first absent level.
#[must_use]
pub fn extract_text(envelope: &RawEnvelope) -> ExtractedText {
    match locate_text(envelope) {
        Ok(text) => ExtractedText {
            text: text.to_owned(),
            defect: None,
        },
        Err(error) => {
            warn!(
                error.kind = error.reason_code(),
                missing = %error,
                vendor_error = envelope
                    .error
                    .as_ref()
                    .and_then(|e| e.message.as_deref())
                    .unwrap_or(""),
                "Vendor envelope is malformed"
            );
            ExtractedText {
                text: String::new(),
                defect: Some(error),
            }
        }
    }
}

fn locate_text(envelope: &RawEnvelope) -> Result<&str, InterpretationError> {
    let candidate = envelope
        .candidates
        .as_deref()
        .and_then(<[Candidate]>::first)
        .ok_or(InterpretationError::Envelope("candidates"))?;
    let parts = candidate
        .content
        .as_ref()
        .ok_or(InterpretationError::Envelope("content"))?
        .parts
        .as_deref()
        .filter(|parts| !parts.is_empty())
        .ok_or(InterpretationError::Envelope("parts"))?;
    parts
        .iter()
        .find_map(|part| part.text.as_deref())
        .ok_or(InterpretationError::Envelope("text"))
}
