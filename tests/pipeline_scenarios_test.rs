// ABOUTME: End-to-end interpretation scenarios from vendor text or envelope to result envelope
// ABOUTME: Parsed records, every fallback cause, keyword reconstruction, and envelope invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    assert_envelope_invariants, body, ctx_at, empty_envelope, envelope, food, init_test_logging,
    voice_food, workout, BODY_JSON, FENCED_APPLE, STRENGTH_WORKOUT_JSON,
};
use pierre_vision::interpretation::pipeline::KEYWORD_RECONSTRUCTION_REASON;
use pierre_vision::interpretation::{
    BodyPhotoSchema, FallbackTables, FoodPhotoSchema, ResponseInterpreter, VoiceFoodSchema,
    VoiceWorkoutSchema,
};
use pierre_vision::models::{
    sum_calories, BmiCategory, BmrCategory, Gender, MealType, UserProfile, WeightUnit,
    WorkoutDetails, WorkoutType,
};

fn interpreter(tables: &FallbackTables) -> ResponseInterpreter<'_> {
    init_test_logging();
    ResponseInterpreter::new(tables)
}

// ============================================================================
// Food photo
// ============================================================================

#[test]
fn test_fenced_food_analysis_parsed() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables).interpret_text::<FoodPhotoSchema>(FENCED_APPLE, &ctx_at(13, 0));

    assert!(result.success);
    assert!(!result.is_fallback);
    assert!(result.reason.is_none());
    let record = food(&result);
    assert_eq!(record.food_items.len(), 1);
    assert_eq!(record.food_items[0].name, "Apple");
    assert_eq!(record.food_items[0].total_calories, 78);
    assert_eq!(record.estimated_calories, 78);
    assert_envelope_invariants(&result);
}

#[test]
fn test_empty_text_uses_breakfast_default() {
    let tables = FallbackTables::default();
    let ctx = ctx_at(13, 0).with_meal_type(Some(MealType::Breakfast));
    let result = interpreter(&tables).interpret_text::<FoodPhotoSchema>("", &ctx);

    assert!(result.success);
    assert!(result.is_fallback);
    assert!(result.reason.as_deref().unwrap().starts_with("JsonSyntaxError"));
    let record = food(&result);
    assert_eq!(record.food_items[0].name, "Oatmeal");
    // 88 kcal per 100 g at 250 g
    assert_eq!(record.food_items[0].total_calories, 220);
    assert!((record.food_items[0].confidence - 0.5).abs() < f64::EPSILON);
    assert_envelope_invariants(&result);
}

#[test]
fn test_meal_type_derived_from_hour_when_absent() {
    let tables = FallbackTables::default();
    let interpreter = interpreter(&tables);

    let dinner = interpreter.interpret_text::<FoodPhotoSchema>("no idea", &ctx_at(19, 45));
    assert_eq!(food(&dinner).food_items[0].name, "Chicken breast");

    let late = interpreter.interpret_text::<FoodPhotoSchema>("no idea", &ctx_at(23, 10));
    assert_eq!(food(&late).food_items[0].name, "Apple");
}

#[test]
fn test_empty_food_list_fails_validation() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables)
        .interpret_text::<FoodPhotoSchema>(r#"{"foodItems": [], "estimatedCalories": 0}"#, &ctx_at(12, 0));

    assert!(result.is_fallback);
    assert_eq!(
        result.reason.as_deref(),
        Some("SemanticValidationError: food items empty")
    );
    assert_eq!(food(&result).food_items[0].name, "Borscht");
    assert_eq!(food(&result).food_items[0].weight_type, WeightUnit::Milliliters);
}

#[test]
fn test_huge_portions_do_not_overflow_totals() {
    let tables = FallbackTables::default();
    let text = r#"{"foodItems": [
        {"name": "Rice", "estimatedWeight": 1e300, "nutritionPer100g": {"calories": 130}},
        {"name": "Beans", "estimatedWeight": 1e300, "nutritionPer100g": {"calories": 120}}
    ]}"#;
    let result = interpreter(&tables).interpret_text::<FoodPhotoSchema>(text, &ctx_at(13, 0));

    assert!(result.success);
    let record = food(&result);
    assert_eq!(record.food_items.len(), 2);
    assert_eq!(record.estimated_calories, i64::MAX);
    assert_eq!(sum_calories(&record.food_items), i64::MAX);
    assert_envelope_invariants(&result);
}

#[test]
fn test_food_prose_reconstructed_from_keywords() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables).interpret_text::<FoodPhotoSchema>(
        "The photo shows a bowl of buckwheat with some butter.",
        &ctx_at(9, 0),
    );

    assert!(result.success);
    assert!(result.is_fallback);
    assert_eq!(result.reason.as_deref(), Some(KEYWORD_RECONSTRUCTION_REASON));
    let record = food(&result);
    assert_eq!(record.food_items[0].name, "Buckwheat");
    assert!((record.food_items[0].confidence - 0.7).abs() < f64::EPSILON);
    assert_eq!(record.estimated_calories, 165);
    assert_envelope_invariants(&result);
}

// ============================================================================
// Body photo
// ============================================================================

#[test]
fn test_unparsable_body_uses_profile() {
    let tables = FallbackTables::default();
    let profile = UserProfile {
        weight_kg: Some(70.0),
        height_cm: Some(175.0),
        age: Some(30),
        gender: Some(Gender::Male),
    };
    let ctx = ctx_at(10, 0).with_profile(profile);
    let result = interpreter(&tables)
        .interpret_text::<BodyPhotoSchema>("I'm sorry, I can't analyse this image.", &ctx);

    assert!(result.is_fallback);
    let record = body(&result);
    assert!((record.bmi - 22.9).abs() < 1e-9);
    assert_eq!(record.bmi_category, BmiCategory::Normal);
    assert_eq!(record.body_type, "Mesomorph");
    // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
    assert!((record.bmr - 1649.0).abs() < f64::EPSILON);
    assert_eq!(record.bmr_category, BmrCategory::Normal);
    assert!(!record.exercise_recommendations.is_empty());
    assert_envelope_invariants(&result);
}

#[test]
fn test_body_without_profile_uses_neutral_values() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables).interpret_text::<BodyPhotoSchema>("", &ctx_at(10, 0));

    let record = body(&result);
    assert!((record.bmi - 22.5).abs() < f64::EPSILON);
    assert!((record.bmr - 1600.0).abs() < f64::EPSILON);
    assert_eq!(record.bmi_category, BmiCategory::Normal);
}

#[test]
fn test_implausible_profile_still_yields_record() {
    let tables = FallbackTables::default();
    let profile = UserProfile {
        weight_kg: Some(3.0),
        height_cm: Some(50.0),
        age: Some(90),
        gender: Some(Gender::Female),
    };
    let ctx = ctx_at(10, 0).with_profile(profile);
    let result = interpreter(&tables).interpret_text::<BodyPhotoSchema>("", &ctx);

    assert!(result.success);
    assert!(result.is_fallback);
    let record = body(&result);
    // The formula goes negative, so the neutral BMR stands in
    assert!((record.bmr - 1600.0).abs() < f64::EPSILON);
    assert!((record.bmi - 12.0).abs() < 1e-9);
    assert_eq!(record.bmi_category, BmiCategory::Underweight);
    assert_envelope_invariants(&result);
}

#[test]
fn test_body_bucket_is_deterministic() {
    let tables = FallbackTables::default();
    let interpreter = interpreter(&tables);
    let profile = UserProfile {
        weight_kg: Some(95.0),
        height_cm: Some(180.0),
        ..UserProfile::default()
    };
    let ctx = ctx_at(8, 0).with_profile(profile);

    let first = interpreter.interpret_text::<BodyPhotoSchema>("garbage", &ctx);
    let second = interpreter.interpret_text::<BodyPhotoSchema>("other garbage", &ctx);
    assert_eq!(body(&first).bmi_category, BmiCategory::Overweight);
    assert_eq!(body(&first).body_type, body(&second).body_type);
    assert_eq!(
        body(&first).nutrition_recommendations,
        body(&second).nutrition_recommendations
    );
}

#[test]
fn test_complete_body_json_parsed() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables).interpret_text::<BodyPhotoSchema>(BODY_JSON, &ctx_at(10, 0));

    assert!(!result.is_fallback);
    let record = body(&result);
    assert!((record.bmr - 1720.0).abs() < f64::EPSILON);
    assert_eq!(record.exercise_recommendations, vec!["Squat twice a week"]);
}

#[test]
fn test_zero_bmi_fails_validation() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables)
        .interpret_text::<BodyPhotoSchema>(r#"{"bmi": 0, "bmr": 1500}"#, &ctx_at(10, 0));

    assert!(result.is_fallback);
    assert_eq!(
        result.reason.as_deref(),
        Some("SemanticValidationError: bmi not positive")
    );
}

// ============================================================================
// Voice workout
// ============================================================================

#[test]
fn test_null_workout_payload_falls_back_to_strength() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables)
        .interpret_text::<VoiceWorkoutSchema>(r#"{"workoutData": null}"#, &ctx_at(18, 30));

    assert!(result.is_fallback);
    assert_eq!(
        result.reason.as_deref(),
        Some("SemanticValidationError: payload missing")
    );
    let session = workout(&result).workout_data.as_ref().unwrap();
    assert_eq!(session.workout_type, WorkoutType::Strength);
    let WorkoutDetails::Strength(strength) = &session.details else {
        panic!("expected strength payload");
    };
    assert_eq!(strength.exercises.len(), 1);
    assert_eq!(strength.exercises[0].sets.len(), 1);
    assert_eq!(strength.exercises[0].sets[0].reps, 10);
    assert!(strength.exercises[0].sets[0].completed);
    assert_eq!(session.start_time, "17:45");
    assert_eq!(session.end_time, "18:30");
    assert_envelope_invariants(&result);
}

#[test]
fn test_strength_workout_parsed_with_coercion() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables)
        .interpret_text::<VoiceWorkoutSchema>(STRENGTH_WORKOUT_JSON, &ctx_at(19, 5));

    assert!(!result.is_fallback);
    let record = workout(&result);
    let session = record.workout_data.as_ref().unwrap();
    assert_eq!(session.estimated_calories, 320);
    let WorkoutDetails::Strength(strength) = &session.details else {
        panic!("expected strength payload");
    };
    let sets = &strength.exercises[0].sets;
    assert!((sets[1].weight_kg - 62.5).abs() < f64::EPSILON);
    assert_eq!(sets[1].reps, 8);
    // "yes" is not a JSON boolean, so the default applies
    assert!(sets[1].completed);
    assert_eq!(record.transcription, "bench press sixty kilos");
}

#[test]
fn test_running_prose_reconstructed_as_cardio() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables)
        .interpret_text::<VoiceWorkoutSchema>("User went running for a while this morning", &ctx_at(8, 0));

    assert!(result.is_fallback);
    assert_eq!(result.reason.as_deref(), Some(KEYWORD_RECONSTRUCTION_REASON));
    let session = workout(&result).workout_data.as_ref().unwrap();
    assert_eq!(session.workout_type, WorkoutType::Cardio);
    let WorkoutDetails::Cardio(cardio) = &session.details else {
        panic!("expected cardio payload");
    };
    assert_eq!(cardio.cardio_type, "Running");
    assert_eq!(cardio.distance_km, None);
    assert_eq!(session.start_time, "07:30");
}

#[test]
fn test_workout_hint_steers_fallback() {
    let tables = FallbackTables::default();
    let ctx = ctx_at(7, 0).with_workout_hint(Some(WorkoutType::Cardio));
    let result = interpreter(&tables).interpret_text::<VoiceWorkoutSchema>("", &ctx);

    let session = workout(&result).workout_data.as_ref().unwrap();
    assert_eq!(session.workout_type, WorkoutType::Cardio);
    assert_eq!(session.estimated_calories, 250);
}

// ============================================================================
// Voice food
// ============================================================================

#[test]
fn test_russian_keyword_reconstructed() {
    let tables = FallbackTables::default();
    let ctx = ctx_at(13, 0).with_meal_type(Some(MealType::Lunch));
    let result = interpreter(&tables).interpret_text::<VoiceFoodSchema>("Я съел тарелку борща", &ctx);

    assert!(result.is_fallback);
    let record = voice_food(&result);
    assert_eq!(record.food_items[0].name, "Borscht");
    assert_eq!(record.meal_type, MealType::Lunch);
    assert_envelope_invariants(&result);
}

#[test]
fn test_unrecognized_voice_food_uses_unspecified_item() {
    let tables = FallbackTables::default();
    let ctx = ctx_at(16, 0).with_meal_type(Some(MealType::Snack));
    let result = interpreter(&tables).interpret_text::<VoiceFoodSchema>("mmm something tasty", &ctx);

    assert!(result.is_fallback);
    assert!(result.reason.as_deref().unwrap().starts_with("JsonSyntaxError"));
    let item = &voice_food(&result).food_items[0];
    assert_eq!(item.name, "Unspecified food");
    assert!((item.estimated_weight - 100.0).abs() < f64::EPSILON);
    assert!((item.confidence - 0.3).abs() < f64::EPSILON);
    assert_envelope_invariants(&result);
}

// ============================================================================
// Envelope and transport causes
// ============================================================================

#[test]
fn test_envelope_text_is_interpreted() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables)
        .interpret_envelope::<FoodPhotoSchema>(&envelope(FENCED_APPLE), &ctx_at(13, 0));
    assert!(!result.is_fallback);
}

#[test]
fn test_missing_candidates_reported_as_envelope_error() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables)
        .interpret_envelope::<VoiceFoodSchema>(&empty_envelope(), &ctx_at(8, 0));

    assert!(result.success);
    assert!(result.is_fallback);
    assert_eq!(
        result.reason.as_deref(),
        Some("EnvelopeError: vendor envelope has no candidates")
    );
    assert_eq!(voice_food(&result).meal_type, MealType::Breakfast);
}

#[test]
fn test_transport_failure_reason_carries_message() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables)
        .interpret_transport_failure::<FoodPhotoSchema>("request timed out", &ctx_at(12, 0));

    assert!(result.is_fallback);
    assert_eq!(
        result.reason.as_deref(),
        Some("TransportError: request timed out")
    );
    assert_envelope_invariants(&result);
}

#[test]
fn test_unusable_tables_produce_failure() {
    let tables = FallbackTables {
        meal_dishes: Vec::new(),
        ..FallbackTables::default()
    };
    let result = interpreter(&tables).interpret_text::<FoodPhotoSchema>("", &ctx_at(12, 0));

    assert!(!result.success);
    assert!(result.record.is_none());
    assert_eq!(result.reason.as_deref(), Some("Analysis could not be completed"));
    assert_envelope_invariants(&result);
}

#[test]
fn test_result_serializes_camel_case() {
    let tables = FallbackTables::default();
    let result = interpreter(&tables).interpret_text::<FoodPhotoSchema>(FENCED_APPLE, &ctx_at(13, 0));
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["isFallback"], false);
    assert!(value.get("reason").is_none());
    assert_eq!(value["record"]["kind"], "food_analysis");
    assert_eq!(value["record"]["foodItems"][0]["totalCalories"], 78);
    assert_eq!(value["record"]["foodItems"][0]["weightType"], "g");
}
