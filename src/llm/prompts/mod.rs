// ABOUTME: Generation prompts per record kind, loaded at compile time
// ABOUTME: Appends request context (meal type, profile, workout hint, local time) to each prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompt bodies live in markdown files next to this module. Each asks the
//! vendor for one JSON object in the inbound wire shape the interpreter reads.
//! The calorie guidance they contain is advisory; parsed records are never
//! checked against it.

use std::fmt::Write as _;

use pierre_vision_core::models::RecordKind;

use crate::interpretation::InterpretationContext;

/// Food photo analysis prompt
pub const FOOD_PHOTO_PROMPT: &str = include_str!("food_photo.md");

/// Body composition photo prompt
pub const BODY_PHOTO_PROMPT: &str = include_str!("body_photo.md");

/// Voice workout logging prompt
pub const VOICE_WORKOUT_PROMPT: &str = include_str!("voice_workout.md");

/// Voice food logging prompt
pub const VOICE_FOOD_PROMPT: &str = include_str!("voice_food.md");

/// Static prompt body for a record kind
#[must_use]
pub const fn base_prompt(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::FoodAnalysis => FOOD_PHOTO_PROMPT,
        RecordKind::BodyAnalysis => BODY_PHOTO_PROMPT,
        RecordKind::VoiceWorkout => VOICE_WORKOUT_PROMPT,
        RecordKind::VoiceFood => VOICE_FOOD_PROMPT,
    }
}

/// Full prompt: static body plus a context section
#[must_use]
pub fn build_prompt(kind: RecordKind, ctx: &InterpretationContext) -> String {
    let mut prompt = String::from(base_prompt(kind));
    prompt.push_str("\nContext:\n");
    // Writing to a String cannot fail
    let _ = writeln!(prompt, "- Current local time: {}", ctx.clock_time());

    match kind {
        RecordKind::FoodAnalysis | RecordKind::VoiceFood => {
            if let Some(meal_type) = ctx.meal_type {
                let _ = writeln!(prompt, "- Meal type: {}", meal_type.as_str());
            }
        }
        RecordKind::BodyAnalysis => {
            let profile = &ctx.profile;
            if let Some(weight) = profile.weight_kg {
                let _ = writeln!(prompt, "- Weight: {weight} kg");
            }
            if let Some(height) = profile.height_cm {
                let _ = writeln!(prompt, "- Height: {height} cm");
            }
            if let Some(age) = profile.age {
                let _ = writeln!(prompt, "- Age: {age}");
            }
            if let Some(gender) = profile.gender {
                let _ = writeln!(prompt, "- Gender: {}", gender.as_str());
            }
        }
        RecordKind::VoiceWorkout => {
            if let Some(hint) = ctx.workout_hint {
                let _ = writeln!(prompt, "- Workout type: {}", hint.as_str());
            }
        }
    }
    prompt
}
