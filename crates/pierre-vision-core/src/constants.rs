// ABOUTME: Domain constants for AI record interpretation and fallback synthesis
// ABOUTME: Confidence levels, biometric thresholds, and coercion defaults grouped by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.
//!
//! Confidence values are fixed design constants. They are not derived from any
//! quality signal of the vendor output.

/// Confidence levels attached to records and items
pub mod confidence {
    /// Items rebuilt from a keyword match in free-form text
    pub const KEYWORD_MATCH: f64 = 0.7;
    /// Context-driven defaults (meal table, BMI bucket, workout defaults)
    pub const CONTEXT_DEFAULT: f64 = 0.5;
    /// Terminal "unspecified food" default
    pub const UNSPECIFIED: f64 = 0.3;
    /// Used when a parsed vendor item carries no confidence of its own
    pub const PARSED_DEFAULT: f64 = 0.9;
}

/// Body mass index thresholds and neutral values
pub mod bmi {
    /// BMI assumed when weight or height is unknown
    pub const NEUTRAL: f64 = 22.5;
    /// Lower bound of the normal bucket
    pub const NORMAL_MIN: f64 = 20.0;
    /// Lower bound of the overweight bucket
    pub const OVERWEIGHT_MIN: f64 = 25.0;
    /// Lower bound of the obese bucket
    pub const OBESE_MIN: f64 = 30.0;
}

/// Basal metabolic rate (Mifflin–St Jeor) constants
pub mod bmr {
    /// Coefficient applied to body weight in kilograms
    pub const WEIGHT_COEFFICIENT: f64 = 10.0;
    /// Coefficient applied to height in centimetres
    pub const HEIGHT_COEFFICIENT: f64 = 6.25;
    /// Coefficient applied to age in years
    pub const AGE_COEFFICIENT: f64 = 5.0;
    /// Sex constant for men
    pub const MALE_OFFSET: f64 = 5.0;
    /// Sex constant for women
    pub const FEMALE_OFFSET: f64 = -161.0;
    /// Sex constant when gender is unknown (mean of the two)
    pub const UNKNOWN_OFFSET: f64 = -78.0;
    /// BMR assumed when the profile is incomplete (kcal/day)
    pub const NEUTRAL: f64 = 1600.0;
    /// Below this value BMR is categorized as low
    pub const LOW_BELOW: f64 = 1400.0;
    /// Above this value BMR is categorized as high
    pub const HIGH_ABOVE: f64 = 2000.0;
}

/// Defaults substituted by the field coercion layer for parsed food items
pub mod food_defaults {
    /// Name used when the vendor omits one
    pub const NAME: &str = "Unknown food";
    /// Weight in grams or millilitres
    pub const WEIGHT: f64 = 100.0;
    /// Calories per 100 units
    pub const CALORIES: f64 = 100.0;
    /// Proteins per 100 units
    pub const PROTEINS: f64 = 5.0;
    /// Fats per 100 units
    pub const FATS: f64 = 5.0;
    /// Carbohydrates per 100 units
    pub const CARBS: f64 = 12.0;
}

/// Reason codes reported in result envelopes
pub mod reasons {
    /// Vendor envelope missing the candidates/content/parts/text nesting
    pub const ENVELOPE_ERROR: &str = "EnvelopeError";
    /// Text unparsable after every recovery stage
    pub const JSON_SYNTAX_ERROR: &str = "JsonSyntaxError";
    /// Parsed record failed domain validation
    pub const SEMANTIC_VALIDATION_ERROR: &str = "SemanticValidationError";
    /// Transport failed after retries
    pub const TRANSPORT_ERROR: &str = "TransportError";
    /// Unexpected failure inside the pipeline
    pub const UNKNOWN_ERROR: &str = "UnknownError";
    /// Message returned to callers when no record could be produced
    pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis could not be completed";
}
