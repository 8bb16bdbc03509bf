// ABOUTME: Fallback synthesis of plausible records from context and lookup tables
// ABOUTME: Meal defaults, BMI-bucket body composition, keyword dishes, and default workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fallback synthesizer
//!
//! Every function here is total over its inputs except when the installed
//! tables lack an entry, which validated tables never do.

/// Lookup tables backing synthesis and keyword reconstruction
pub mod tables;

use pierre_vision_core::constants::{bmr, confidence};
use pierre_vision_core::errors::InterpretationError;
use pierre_vision_core::models::{
    sum_calories, BmrCategory, BodyAnalysis, CardioData, ExerciseEntry, FoodAnalysis, FoodItem,
    Gender, MealType, StrengthData, StrengthSet, UserProfile, VoiceFood, VoiceWorkout,
    WorkoutDetails, WorkoutSession, WorkoutType,
};

pub use tables::{
    BmiBucket, DishProfile, ExerciseKeyword, FallbackTables, FoodKeyword, MealDish, TimeBand,
    WorkoutDefault, MAX_WORKOUT_MINUTES,
};

use super::context::InterpretationContext;

/// Mifflin-St Jeor BMR, or `None` when weight, height or age is unknown
///
/// Unknown gender uses the mean of the male and female sex constants. Profiles
/// with non-positive measurements, or whose formula result is not a positive
/// finite number, yield `None` so callers substitute the neutral BMR.
#[must_use]
pub fn mifflin_st_jeor(profile: &UserProfile) -> Option<f64> {
    let (Some(weight), Some(height), Some(age)) = (profile.weight_kg, profile.height_cm, profile.age)
    else {
        return None;
    };
    if !(weight > 0.0 && height > 0.0) {
        return None;
    }
    let offset = match profile.gender {
        Some(Gender::Male) => bmr::MALE_OFFSET,
        Some(Gender::Female) => bmr::FEMALE_OFFSET,
        None => bmr::UNKNOWN_OFFSET,
    };
    let estimate = bmr::AGE_COEFFICIENT.mul_add(
        -f64::from(age),
        bmr::WEIGHT_COEFFICIENT.mul_add(weight, bmr::HEIGHT_COEFFICIENT * height),
    ) + offset;
    (estimate.is_finite() && estimate > 0.0).then_some(estimate)
}

/// Typical dish of the requested (or time-implied) meal
///
/// # Errors
///
/// Returns [`InterpretationError::Unknown`] if the tables have no dish for the meal
pub fn food_analysis(
    ctx: &InterpretationContext,
    tables: &FallbackTables,
) -> Result<FoodAnalysis, InterpretationError> {
    let meal_type = ctx.effective_meal_type(tables);
    let dish = tables.dish_for_meal(meal_type).ok_or_else(|| {
        InterpretationError::Unknown(format!("no fallback dish for {}", meal_type.as_str()))
    })?;
    let items = vec![dish.to_item(confidence::CONTEXT_DEFAULT)];
    Ok(FoodAnalysis {
        estimated_calories: sum_calories(&items),
        full_description: format!("Typical {} portion: {}", meal_type.as_str(), dish.name),
        food_items: items,
    })
}

/// Body composition typical for the profile's BMI
///
/// # Errors
///
/// Returns [`InterpretationError::Unknown`] if no BMI bucket covers the computed BMI
pub fn body_analysis(
    ctx: &InterpretationContext,
    tables: &FallbackTables,
) -> Result<BodyAnalysis, InterpretationError> {
    let bmi = ctx.profile.bmi().unwrap_or(tables.neutral_bmi);
    let bucket = tables.bucket_for_bmi(bmi).ok_or_else(|| {
        InterpretationError::Unknown(format!("no BMI bucket covers {bmi:.1}"))
    })?;
    let bmr = mifflin_st_jeor(&ctx.profile).unwrap_or(tables.neutral_bmr);
    let description = if ctx.profile.bmi().is_some() {
        "Estimated from stored profile measurements"
    } else {
        "Typical values for an average adult"
    };

    Ok(BodyAnalysis {
        body_fat_percentage: bucket.body_fat_percentage,
        muscle_percentage: bucket.muscle_percentage,
        bmi: (bmi * 10.0).round() / 10.0,
        bmi_category: bucket.category,
        body_type: bucket.body_type.clone(),
        estimated_waist_cm: bucket.waist_cm,
        estimated_chest_cm: bucket.chest_cm,
        estimated_hip_cm: bucket.hip_cm,
        bmr: bmr.round(),
        bmr_category: BmrCategory::from_bmr(bmr),
        exercise_recommendations: bucket.exercise_recommendations.clone(),
        nutrition_recommendations: bucket.nutrition_recommendations.clone(),
        confidence: confidence::CONTEXT_DEFAULT,
        full_description: description.to_owned(),
    })
}

/// Food item for the first dish mentioned in the text, else the unspecified default
#[must_use]
pub fn voice_food_item(text_lower: &str, meal_type: MealType, tables: &FallbackTables) -> FoodItem {
    if let Some(dish) = tables.match_food(text_lower) {
        return dish.to_item(confidence::KEYWORD_MATCH);
    }
    let weight = if meal_type == MealType::Snack {
        tables.unspecified_snack_weight
    } else {
        tables.unspecified_food.weight
    };
    tables
        .unspecified_food
        .to_item_with_weight(weight, confidence::UNSPECIFIED)
}

/// Voice food record from keyword match or the unspecified default
#[must_use]
pub fn voice_food(
    text_lower: &str,
    ctx: &InterpretationContext,
    tables: &FallbackTables,
) -> VoiceFood {
    let meal_type = ctx.effective_meal_type(tables);
    VoiceFood {
        food_items: vec![voice_food_item(text_lower, meal_type, tables)],
        meal_type,
        transcription: String::new(),
    }
}

/// Workout type to synthesize: the hint, else a keyword match, else strength
#[must_use]
pub fn workout_type_for(
    text_lower: &str,
    ctx: &InterpretationContext,
    tables: &FallbackTables,
) -> WorkoutType {
    ctx.workout_hint
        .or_else(|| tables.match_exercise(text_lower).map(|e| e.workout_type))
        .unwrap_or(WorkoutType::Strength)
}

/// Default session for the chosen workout type, ending at the context's local time
#[must_use]
pub fn voice_workout(
    text_lower: &str,
    ctx: &InterpretationContext,
    tables: &FallbackTables,
) -> VoiceWorkout {
    let workout_type = workout_type_for(text_lower, ctx, tables);
    let default = tables.workout_default(workout_type);
    let details = match workout_type {
        WorkoutType::Strength => WorkoutDetails::Strength(StrengthData {
            exercises: vec![ExerciseEntry {
                name: default.name.clone(),
                sets: vec![StrengthSet {
                    weight_kg: 0.0,
                    reps: default.reps,
                    completed: true,
                }],
            }],
        }),
        WorkoutType::Cardio => WorkoutDetails::Cardio(CardioData {
            cardio_type: default.name.clone(),
            distance_km: None,
            avg_pulse: None,
            max_pulse: None,
            avg_pace: None,
        }),
    };

    VoiceWorkout {
        workout_data: Some(WorkoutSession::new(
            ctx.clock_time_minutes_ago(default.duration_minutes),
            ctx.clock_time(),
            default.estimated_calories,
            confidence::CONTEXT_DEFAULT,
            details,
        )),
        transcription: String::new(),
    }
}
