// ABOUTME: Canonical domain records produced by the vision interpretation pipeline
// ABOUTME: Food, body, and voice workout/food records plus the outbound result envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models
//!
//! One canonical record per kind. Records are plain values: every pipeline
//! stage builds a new value instead of mutating one produced earlier.

/// Body composition analysis from a photo
pub mod body;
/// Result envelope returned to callers
pub mod envelope;
/// Food items, nutrition, meal types, and weight units
pub mod food;
/// User profile hints used for biometric defaults
pub mod profile;
/// Tagged union over the four record kinds
pub mod record;
/// Voice-logged workouts
pub mod workout;

pub use body::{BmiCategory, BmrCategory, BodyAnalysis};
pub use envelope::ResultEnvelope;
pub use food::{
    sum_calories, FoodAnalysis, FoodItem, MealType, NutritionPer100, VoiceFood, WeightUnit,
};
pub use profile::{Gender, UserProfile};
pub use record::{DomainRecord, RecordKind};
pub use workout::{
    CardioData, ExerciseEntry, StrengthData, StrengthSet, VoiceWorkout, WorkoutDetails,
    WorkoutSession, WorkoutType,
};
