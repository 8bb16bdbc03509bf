// ABOUTME: Outbound result envelope, the only type crossing the interpretation boundary
// ABOUTME: Constructors for parsed, fallback, and failed outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::DomainRecord;

/// Outcome handed to the controller layer
///
/// `success = false` only when no record could be produced at all; every
/// absorbed vendor failure yields `success = true, is_fallback = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    /// Whether `record` is present
    pub success: bool,
    /// Whether `record` was synthesized instead of parsed from vendor output
    pub is_fallback: bool,
    /// Diagnostic reason, always present for fallbacks and failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The record
    pub record: Option<DomainRecord>,
}

impl ResultEnvelope {
    /// Record parsed from vendor output and validated
    #[must_use]
    pub fn parsed(record: impl Into<DomainRecord>) -> Self {
        Self {
            success: true,
            is_fallback: false,
            reason: None,
            record: Some(record.into()),
        }
    }

    /// Synthesized record; `reason` explains why the vendor output was not used
    #[must_use]
    pub fn fallback(record: impl Into<DomainRecord>, reason: impl Into<String>) -> Self {
        Self {
            success: true,
            is_fallback: true,
            reason: Some(reason.into()),
            record: Some(record.into()),
        }
    }

    /// No record could be produced
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            is_fallback: false,
            reason: Some(message.into()),
            record: None,
        }
    }

    /// Borrow the record
    #[must_use]
    pub const fn record(&self) -> Option<&DomainRecord> {
        self.record.as_ref()
    }
}
