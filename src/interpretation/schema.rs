// ABOUTME: Per-kind schemas plugged into the generic interpretation pipeline
// ABOUTME: Coercion, validation, keyword reconstruction, and fallback synthesis for each record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record schemas
//!
//! A [`RecordSchema`] tells the pipeline how to turn a recovered JSON node into
//! one record kind, how to judge it, and how to stand in for it when the vendor
//! output is unusable.

use pierre_vision_core::constants::{confidence, food_defaults};
use pierre_vision_core::errors::InterpretationError;
use pierre_vision_core::models::{
    sum_calories, BmiCategory, BmrCategory, BodyAnalysis, CardioData, DomainRecord, ExerciseEntry,
    FoodAnalysis, FoodItem, MealType, NutritionPer100, RecordKind, StrengthData, StrengthSet,
    VoiceFood, VoiceWorkout, WeightUnit, WorkoutDetails, WorkoutSession, WorkoutType,
};
use serde_json::{json, Value};

use super::coercion::{clamp_unit, non_negative, positive_or, FieldReader};
use super::context::InterpretationContext;
use super::fallback::{self, FallbackTables};
use super::validation::{
    validate_body_analysis, validate_food_analysis, validate_voice_food, validate_voice_workout,
    ValidationOutcome,
};

/// Plausible heart-rate range (bpm)
const PULSE_RANGE: std::ops::RangeInclusive<f64> = 30.0..=250.0;

/// How one record kind is read, checked and synthesized
pub trait RecordSchema {
    /// Record produced by this schema
    type Record: Clone + Into<DomainRecord>;

    /// Kind tag
    const KIND: RecordKind;

    /// Build a record from a recovered JSON object, substituting defaults for bad fields
    fn coerce(node: &Value, ctx: &InterpretationContext, tables: &FallbackTables) -> Self::Record;

    /// Domain rules a record must satisfy to be returned as parsed
    fn validate(record: &Self::Record) -> ValidationOutcome;

    /// Minimal vendor-shaped object rebuilt from keywords in lowercase text
    fn reconstruct(
        text_lower: &str,
        ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Option<Value>;

    /// Plausible stand-in record
    ///
    /// # Errors
    ///
    /// Returns [`InterpretationError::Unknown`] when the tables cannot support synthesis
    fn synthesize(
        text_lower: &str,
        ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Result<Self::Record, InterpretationError>;
}

// ============================================================================
// Food items (shared by photo and voice)
// ============================================================================

/// Coerce one vendor food item
#[must_use]
pub fn coerce_food_item(node: &Value) -> FoodItem {
    let item = FieldReader::new(node);
    let nutrition_node = item.child("nutritionPer100g");
    let nutrition = NutritionPer100 {
        calories: non_negative(nutrition_node.number("calories", food_defaults::CALORIES)),
        proteins: non_negative(nutrition_node.number("proteins", food_defaults::PROTEINS)),
        fats: non_negative(nutrition_node.number("fats", food_defaults::FATS)),
        carbs: non_negative(nutrition_node.number("carbs", food_defaults::CARBS)),
    };
    let weight = positive_or(
        item.number("estimatedWeight", food_defaults::WEIGHT),
        food_defaults::WEIGHT,
    );
    let computed_total = nutrition.total_calories_for(weight);
    let total_calories = item
        .optional_number("totalCalories")
        .filter(|total| *total >= 0.0)
        .map_or(computed_total, |total| total.round() as i64);

    FoodItem {
        name: item.string("name", food_defaults::NAME),
        estimated_weight: weight,
        weight_type: WeightUnit::from_str_lossy(&item.string("weightType", "g")),
        nutrition_per_100g: nutrition,
        total_calories,
        confidence: clamp_unit(item.number("confidence", confidence::PARSED_DEFAULT)),
    }
}

fn coerce_food_items(reader: &FieldReader<'_>) -> Vec<FoodItem> {
    reader
        .first_array(&["foodItems", "items", "foods"])
        .iter()
        .filter(|node| node.is_object())
        .map(coerce_food_item)
        .collect()
}

// ============================================================================
// Food photo
// ============================================================================

/// Photo of a meal
#[derive(Debug, Clone, Copy)]
pub struct FoodPhotoSchema;

impl RecordSchema for FoodPhotoSchema {
    type Record = FoodAnalysis;
    const KIND: RecordKind = RecordKind::FoodAnalysis;

    fn coerce(node: &Value, _ctx: &InterpretationContext, _tables: &FallbackTables) -> FoodAnalysis {
        let reader = FieldReader::new(node);
        let food_items = coerce_food_items(&reader);
        let estimated_calories = reader
            .optional_number("estimatedCalories")
            .filter(|total| *total >= 0.0)
            .map_or_else(|| sum_calories(&food_items), |total| total.round() as i64);
        FoodAnalysis {
            estimated_calories,
            full_description: reader.string("fullDescription", ""),
            food_items,
        }
    }

    fn validate(record: &FoodAnalysis) -> ValidationOutcome {
        validate_food_analysis(record)
    }

    fn reconstruct(
        text_lower: &str,
        _ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Option<Value> {
        let dish = tables.match_food(text_lower)?;
        Some(json!({
            "foodItems": [dish.to_vendor_node(confidence::KEYWORD_MATCH)],
            "estimatedCalories": dish.nutrition.total_calories_for(dish.weight),
            "fullDescription": format!("Recognized from description: {}", dish.name),
        }))
    }

    fn synthesize(
        _text_lower: &str,
        ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Result<FoodAnalysis, InterpretationError> {
        fallback::food_analysis(ctx, tables)
    }
}

// ============================================================================
// Body photo
// ============================================================================

/// Photo of a person for body composition
#[derive(Debug, Clone, Copy)]
pub struct BodyPhotoSchema;

impl RecordSchema for BodyPhotoSchema {
    type Record = BodyAnalysis;
    const KIND: RecordKind = RecordKind::BodyAnalysis;

    fn coerce(node: &Value, _ctx: &InterpretationContext, tables: &FallbackTables) -> BodyAnalysis {
        let reader = FieldReader::new(node);
        let bmi = reader.number("bmi", 0.0);
        let bmr = reader.number("bmr", 0.0);

        // Fields the vendor left out take the values typical for its BMI
        let bucket = tables.bucket_for_bmi(if bmi > 0.0 { bmi } else { tables.neutral_bmi });
        let typical = |pick: fn(&fallback::BmiBucket) -> f64| bucket.map_or(0.0, pick);
        let typical_list = |pick: fn(&fallback::BmiBucket) -> &Vec<String>| {
            bucket.map(pick).cloned().unwrap_or_default()
        };

        let exercise_recommendations = Some(reader.string_list("exerciseRecommendations"))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| typical_list(|b| &b.exercise_recommendations));
        let nutrition_recommendations = Some(reader.string_list("nutritionRecommendations"))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| typical_list(|b| &b.nutrition_recommendations));

        BodyAnalysis {
            body_fat_percentage: reader.number("bodyFatPercentage", typical(|b| b.body_fat_percentage)),
            muscle_percentage: reader.number("musclePercentage", typical(|b| b.muscle_percentage)),
            bmi,
            bmi_category: reader
                .optional_string("bmiCategory")
                .and_then(|label| BmiCategory::from_label(&label))
                .unwrap_or_else(|| BmiCategory::from_bmi(bmi)),
            body_type: reader.string(
                "bodyType",
                bucket.map_or("Unknown", |b| b.body_type.as_str()),
            ),
            estimated_waist_cm: reader.number("estimatedWaistCm", typical(|b| b.waist_cm)),
            estimated_chest_cm: reader.number("estimatedChestCm", typical(|b| b.chest_cm)),
            estimated_hip_cm: reader.number("estimatedHipCm", typical(|b| b.hip_cm)),
            bmr,
            bmr_category: reader
                .optional_string("bmrCategory")
                .and_then(|label| BmrCategory::from_label(&label))
                .unwrap_or_else(|| BmrCategory::from_bmr(bmr)),
            exercise_recommendations,
            nutrition_recommendations,
            confidence: clamp_unit(reader.number("confidence", confidence::PARSED_DEFAULT)),
            full_description: reader.string("fullDescription", ""),
        }
    }

    fn validate(record: &BodyAnalysis) -> ValidationOutcome {
        validate_body_analysis(record)
    }

    fn reconstruct(
        _text_lower: &str,
        _ctx: &InterpretationContext,
        _tables: &FallbackTables,
    ) -> Option<Value> {
        None
    }

    fn synthesize(
        _text_lower: &str,
        ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Result<BodyAnalysis, InterpretationError> {
        fallback::body_analysis(ctx, tables)
    }
}

// ============================================================================
// Voice workout
// ============================================================================

/// Spoken description of a finished workout
#[derive(Debug, Clone, Copy)]
pub struct VoiceWorkoutSchema;

impl VoiceWorkoutSchema {
    fn coerce_session(
        session: &FieldReader<'_>,
        ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> WorkoutSession {
        let workout_type = session
            .optional_string("type")
            .or_else(|| session.optional_string("workoutType"))
            .and_then(|label| WorkoutType::from_str_lossy(&label))
            .or_else(|| {
                if session.has("cardioData") && !session.has("strengthData") {
                    Some(WorkoutType::Cardio)
                } else if session.has("strengthData") {
                    Some(WorkoutType::Strength)
                } else {
                    None
                }
            })
            .or(ctx.workout_hint)
            .unwrap_or(WorkoutType::Strength);

        let default = tables.workout_default(workout_type);
        let details = match workout_type {
            WorkoutType::Strength => {
                WorkoutDetails::Strength(Self::coerce_strength(&session.child("strengthData")))
            }
            WorkoutType::Cardio => {
                WorkoutDetails::Cardio(Self::coerce_cardio(&session.child("cardioData"), &default.name))
            }
        };

        let estimated_calories = session
            .optional_number("estimatedCalories")
            .filter(|calories| *calories >= 0.0)
            .map_or(default.estimated_calories, |calories| calories.round() as i64);

        WorkoutSession::new(
            session.optional_string("startTime")
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| ctx.clock_time_minutes_ago(default.duration_minutes)),
            session.optional_string("endTime")
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| ctx.clock_time()),
            estimated_calories,
            clamp_unit(session.number("confidence", confidence::PARSED_DEFAULT)),
            details,
        )
    }

    fn coerce_strength(strength: &FieldReader<'_>) -> StrengthData {
        let exercises = strength
            .array("exercises")
            .iter()
            .filter(|node| node.is_object())
            .map(|node| {
                let exercise = FieldReader::new(node);
                let sets = exercise
                    .array("sets")
                    .iter()
                    .filter(|node| node.is_object())
                    .map(|node| {
                        let set = FieldReader::new(node);
                        StrengthSet {
                            weight_kg: non_negative(
                                set.optional_number("weightKg")
                                    .or_else(|| set.optional_number("weight"))
                                    .unwrap_or(0.0),
                            ),
                            reps: u32::try_from(set.integer("reps", 0).max(0))
                                .unwrap_or(u32::MAX),
                            completed: set.boolean("completed", true),
                        }
                    })
                    .collect();
                ExerciseEntry {
                    name: exercise.string("name", "Exercise"),
                    sets,
                }
            })
            .collect();
        StrengthData { exercises }
    }

    fn coerce_cardio(cardio: &FieldReader<'_>, default_name: &str) -> CardioData {
        let pulse = |field: &str| {
            cardio
                .optional_number(field)
                .filter(|bpm| PULSE_RANGE.contains(bpm))
                .map(|bpm| bpm.round() as u32)
        };
        CardioData {
            cardio_type: cardio.string("cardioType", default_name),
            distance_km: cardio.optional_number("distanceKm").filter(|km| *km > 0.0),
            avg_pulse: pulse("avgPulse"),
            max_pulse: pulse("maxPulse"),
            avg_pace: cardio.optional_string("avgPace").filter(|p| !p.trim().is_empty()),
        }
    }
}

impl RecordSchema for VoiceWorkoutSchema {
    type Record = VoiceWorkout;
    const KIND: RecordKind = RecordKind::VoiceWorkout;

    fn coerce(node: &Value, ctx: &InterpretationContext, tables: &FallbackTables) -> VoiceWorkout {
        let reader = FieldReader::new(node);
        // An explicit `workoutData: null` means no payload; a bare session at the top level is accepted
        let workout_data = if reader.contains_key("workoutData") {
            reader
                .get("workoutData")
                .filter(|value| value.is_object())
                .map(|value| Self::coerce_session(&FieldReader::new(value), ctx, tables))
        } else if reader.has("type") || reader.has("strengthData") || reader.has("cardioData") {
            Some(Self::coerce_session(&reader, ctx, tables))
        } else {
            None
        };

        VoiceWorkout {
            workout_data,
            transcription: reader.string("transcription", ""),
        }
    }

    fn validate(record: &VoiceWorkout) -> ValidationOutcome {
        validate_voice_workout(record)
    }

    fn reconstruct(
        text_lower: &str,
        ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Option<Value> {
        let exercise = tables.match_exercise(text_lower)?;
        let default = tables.workout_default(exercise.workout_type);
        let payload = match exercise.workout_type {
            WorkoutType::Strength => json!({
                "strengthData": {
                    "exercises": [{
                        "name": exercise.name,
                        "sets": [{"weightKg": 0, "reps": tables.strength_default.reps, "completed": true}],
                    }],
                },
            }),
            WorkoutType::Cardio => json!({
                "cardioData": {"cardioType": exercise.name},
            }),
        };

        let mut session = json!({
            "type": exercise.workout_type.as_str(),
            "startTime": ctx.clock_time_minutes_ago(default.duration_minutes),
            "endTime": ctx.clock_time(),
            "estimatedCalories": default.estimated_calories,
            "confidence": confidence::KEYWORD_MATCH,
        });
        if let (Some(target), Some(extra)) = (session.as_object_mut(), payload.as_object()) {
            target.extend(extra.clone());
        }
        Some(json!({ "workoutData": session }))
    }

    fn synthesize(
        text_lower: &str,
        ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Result<VoiceWorkout, InterpretationError> {
        Ok(fallback::voice_workout(text_lower, ctx, tables))
    }
}

// ============================================================================
// Voice food
// ============================================================================

/// Spoken description of a meal
#[derive(Debug, Clone, Copy)]
pub struct VoiceFoodSchema;

impl RecordSchema for VoiceFoodSchema {
    type Record = VoiceFood;
    const KIND: RecordKind = RecordKind::VoiceFood;

    fn coerce(node: &Value, ctx: &InterpretationContext, tables: &FallbackTables) -> VoiceFood {
        let reader = FieldReader::new(node);
        let meal_type = ctx
            .meal_type
            .or_else(|| {
                reader
                    .optional_string("mealType")
                    .and_then(|label| MealType::from_str_lossy(&label))
            })
            .unwrap_or_else(|| ctx.effective_meal_type(tables));
        VoiceFood {
            food_items: coerce_food_items(&reader),
            meal_type,
            transcription: reader.string("transcription", ""),
        }
    }

    fn validate(record: &VoiceFood) -> ValidationOutcome {
        validate_voice_food(record)
    }

    fn reconstruct(
        text_lower: &str,
        _ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Option<Value> {
        let dish = tables.match_food(text_lower)?;
        Some(json!({
            "foodItems": [dish.to_vendor_node(confidence::KEYWORD_MATCH)],
        }))
    }

    fn synthesize(
        text_lower: &str,
        ctx: &InterpretationContext,
        tables: &FallbackTables,
    ) -> Result<VoiceFood, InterpretationError> {
        Ok(fallback::voice_food(text_lower, ctx, tables))
    }
}
