// ABOUTME: Failure taxonomy for interpreting generative vendor output
// ABOUTME: Maps each failure to the reason code reported in result envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use crate::constants::reasons;

/// Why a vendor response could not be used as a record directly
///
/// `Envelope`, `JsonSyntax`, `SemanticValidation` and `Transport` are always
/// resolved through fallback synthesis. `Unknown` is the only variant that
/// produces an empty result for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretationError {
    /// Transport failed and retries were exhausted by the caller
    #[error("{message}")]
    Transport {
        /// Transport-level description (status, timeout, ...)
        message: String,
    },

    /// Vendor envelope lacks the candidates/content/parts/text nesting
    #[error("vendor envelope has no {0}")]
    Envelope(&'static str),

    /// No JSON object could be recovered from the vendor text
    #[error("no parseable JSON object in vendor text")]
    JsonSyntax,

    /// Parsed record violates a domain rule
    #[error("{0}")]
    SemanticValidation(&'static str),

    /// Anything else, typically a broken invariant inside the pipeline
    #[error("{0}")]
    Unknown(String),
}

impl InterpretationError {
    /// Stable reason code for this failure
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => reasons::TRANSPORT_ERROR,
            Self::Envelope(_) => reasons::ENVELOPE_ERROR,
            Self::JsonSyntax => reasons::JSON_SYNTAX_ERROR,
            Self::SemanticValidation(_) => reasons::SEMANTIC_VALIDATION_ERROR,
            Self::Unknown(_) => reasons::UNKNOWN_ERROR,
        }
    }

    /// Reason string carried by a fallback result (`"<code>: <detail>"`)
    #[must_use]
    pub fn to_reason(&self) -> String {
        format!("{}: {self}", self.reason_code())
    }

    /// Whether the pipeline resolves this failure by synthesizing a record
    #[must_use]
    pub const fn is_absorbed(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}
