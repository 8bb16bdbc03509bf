// ABOUTME: Generic interpretation pipeline from vendor envelope or text to a result envelope
// ABOUTME: Extract, recover, coerce, validate; otherwise synthesize a fallback and re-validate it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_vision_core::constants::reasons;
use pierre_vision_core::errors::InterpretationError;
use pierre_vision_core::models::ResultEnvelope;
use tracing::{debug, error, warn};

use super::context::InterpretationContext;
use super::envelope::{extract_text, RawEnvelope};
use super::fallback::FallbackTables;
use super::recovery::{recover_json, RecoveryStage};
use super::schema::RecordSchema;

/// Reason attached to records rebuilt from keywords
pub const KEYWORD_RECONSTRUCTION_REASON: &str =
    "JsonSyntaxError: recovered by keyword reconstruction";

/// Turns vendor output into a [`ResultEnvelope`] for any [`RecordSchema`]
///
/// Every entry point returns an envelope; absorbed failures become fallback
/// records. Only a synthesized record that fails its own validation produces
/// `success = false`.
#[derive(Debug, Clone, Copy)]
pub struct ResponseInterpreter<'t> {
    tables: &'t FallbackTables,
}

impl ResponseInterpreter<'static> {
    /// Interpreter over the process-wide tables
    #[must_use]
    pub fn global() -> Self {
        Self::new(FallbackTables::global())
    }
}

impl<'t> ResponseInterpreter<'t> {
    /// Interpreter over the given tables
    #[must_use]
    pub const fn new(tables: &'t FallbackTables) -> Self {
        Self { tables }
    }

    /// Tables in use
    #[must_use]
    pub const fn tables(&self) -> &'t FallbackTables {
        self.tables
    }

    /// Interpret a raw vendor envelope
    #[must_use]
    pub fn interpret_envelope<S: RecordSchema>(
        &self,
        envelope: &RawEnvelope,
        ctx: &InterpretationContext,
    ) -> ResultEnvelope {
        let extracted = extract_text(envelope);
        match extracted.envelope_error() {
            Some(defect) => self.fall_back::<S>("", ctx, defect),
            None => self.interpret_text::<S>(extracted.as_str(), ctx),
        }
    }

    /// Interpret text already taken out of the envelope
    #[must_use]
    pub fn interpret_text<S: RecordSchema>(
        &self,
        text: &str,
        ctx: &InterpretationContext,
    ) -> ResultEnvelope {
        let text_lower = text.to_lowercase();
        let Some(recovered) =
            recover_json(text, |_| S::reconstruct(&text_lower, ctx, self.tables))
        else {
            let cause = InterpretationError::JsonSyntax;
            warn!(
                kind = %S::KIND,
                error.kind = cause.reason_code(),
                text_len = text.len(),
                "No JSON object recoverable from vendor text"
            );
            return self.fall_back::<S>(&text_lower, ctx, &cause);
        };

        debug!(kind = %S::KIND, stage = %recovered.stage, "Recovered JSON from vendor text");

        let record = S::coerce(&recovered.node, ctx, self.tables);
        let outcome = S::validate(&record);
        if !outcome.passed {
            let cause = InterpretationError::SemanticValidation(outcome.reason);
            warn!(
                kind = %S::KIND,
                error.kind = cause.reason_code(),
                rule = outcome.reason,
                stage = %recovered.stage,
                "Vendor record failed domain validation"
            );
            return self.fall_back::<S>(&text_lower, ctx, &cause);
        }

        if recovered.stage == RecoveryStage::KeywordReconstruction {
            warn!(
                kind = %S::KIND,
                error.kind = reasons::JSON_SYNTAX_ERROR,
                "Record rebuilt from keywords in vendor text"
            );
            return ResultEnvelope::fallback(record, KEYWORD_RECONSTRUCTION_REASON);
        }

        ResultEnvelope::parsed(record)
    }

    /// Fallback after the transport gave up
    #[must_use]
    pub fn interpret_transport_failure<S: RecordSchema>(
        &self,
        message: &str,
        ctx: &InterpretationContext,
    ) -> ResultEnvelope {
        let cause = InterpretationError::Transport {
            message: message.to_owned(),
        };
        warn!(
            kind = %S::KIND,
            error.kind = cause.reason_code(),
            error = %cause,
            "Transport failed, synthesizing fallback record"
        );
        self.fall_back::<S>("", ctx, &cause)
    }

    /// Synthesize a stand-in record, re-validate it, and wrap it with `cause` as the reason
    fn fall_back<S: RecordSchema>(
        &self,
        text_lower: &str,
        ctx: &InterpretationContext,
        cause: &InterpretationError,
    ) -> ResultEnvelope {
        let synthesized = S::synthesize(text_lower, ctx, self.tables).and_then(|record| {
            let outcome = S::validate(&record);
            if outcome.passed {
                Ok(record)
            } else {
                Err(InterpretationError::Unknown(format!(
                    "synthesized {} record failed validation: {}",
                    S::KIND,
                    outcome.reason
                )))
            }
        });

        match synthesized {
            Ok(record) => ResultEnvelope::fallback(record, cause.to_reason()),
            Err(failure) => {
                error!(
                    kind = %S::KIND,
                    error.kind = reasons::UNKNOWN_ERROR,
                    cause = %cause.to_reason(),
                    error = %failure,
                    meal_type = ?ctx.meal_type,
                    workout_hint = ?ctx.workout_hint,
                    local_time = %ctx.local_time,
                    "Fallback synthesis failed"
                );
                ResultEnvelope::failure(reasons::GENERIC_FAILURE_MESSAGE)
            }
        }
    }
}
