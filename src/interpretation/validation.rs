// ABOUTME: Domain validation of coerced records before they are returned as parsed
// ABOUTME: Non-empty food lists, positive BMI and BMR, non-negative composition, workout payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_vision_core::errors::InterpretationError;
use pierre_vision_core::models::{BodyAnalysis, DomainRecord, FoodAnalysis, VoiceFood, VoiceWorkout};

/// Result of validating one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the record may be returned as parsed
    pub passed: bool,
    /// Short reason code
    pub reason: &'static str,
}

impl ValidationOutcome {
    /// Record passes
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            reason: "ok",
        }
    }

    /// Record fails for `reason`
    #[must_use]
    pub const fn fail(reason: &'static str) -> Self {
        Self {
            passed: false,
            reason,
        }
    }

    const fn check(condition: bool, reason: &'static str) -> Self {
        if condition {
            Self::pass()
        } else {
            Self::fail(reason)
        }
    }

    /// Convert into a `Result` carrying a semantic validation error
    ///
    /// # Errors
    ///
    /// Returns [`InterpretationError::SemanticValidation`] when the outcome failed
    pub const fn into_result(self) -> Result<(), InterpretationError> {
        if self.passed {
            Ok(())
        } else {
            Err(InterpretationError::SemanticValidation(self.reason))
        }
    }
}

/// At least one food item
#[must_use]
pub fn validate_food_analysis(record: &FoodAnalysis) -> ValidationOutcome {
    ValidationOutcome::check(!record.food_items.is_empty(), "food items empty")
}

/// At least one food item
#[must_use]
pub fn validate_voice_food(record: &VoiceFood) -> ValidationOutcome {
    ValidationOutcome::check(!record.food_items.is_empty(), "food items empty")
}

/// Positive BMI and BMR; non-negative body fat and muscle percentages
#[must_use]
pub fn validate_body_analysis(record: &BodyAnalysis) -> ValidationOutcome {
    let positive = |v: f64| !v.is_nan() && v > 0.0;
    let non_negative = |v: f64| !v.is_nan() && v >= 0.0;

    if !positive(record.bmi) {
        return ValidationOutcome::fail("bmi not positive");
    }
    if !positive(record.bmr) {
        return ValidationOutcome::fail("bmr not positive");
    }
    if !non_negative(record.body_fat_percentage) {
        return ValidationOutcome::fail("body fat negative");
    }
    if !non_negative(record.muscle_percentage) {
        return ValidationOutcome::fail("muscle negative");
    }
    ValidationOutcome::pass()
}

/// A workout payload is present
#[must_use]
pub fn validate_voice_workout(record: &VoiceWorkout) -> ValidationOutcome {
    ValidationOutcome::check(record.workout_data.is_some(), "payload missing")
}

/// Dispatch on the record kind
#[must_use]
pub fn validate_record(record: &DomainRecord) -> ValidationOutcome {
    match record {
        DomainRecord::FoodAnalysis(r) => validate_food_analysis(r),
        DomainRecord::BodyAnalysis(r) => validate_body_analysis(r),
        DomainRecord::VoiceWorkout(r) => validate_voice_workout(r),
        DomainRecord::VoiceFood(r) => validate_voice_food(r),
    }
}
