// ABOUTME: Voice-logged workout models with mutually exclusive strength and cardio payloads
// ABOUTME: WorkoutSession, WorkoutDetails, StrengthData, CardioData, and the VoiceWorkout record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Workout type tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    /// Sets and repetitions
    Strength,
    /// Continuous aerobic session
    Cardio,
}

impl WorkoutType {
    /// Parse workout type from string, `None` when unrecognized
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "силовая" | "weights" => Some(Self::Strength),
            "cardio" | "кардио" => Some(Self::Cardio),
            _ => None,
        }
    }

    /// Wire tag
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
        }
    }
}

/// One set of a strength exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthSet {
    /// Load in kilograms, 0 for bodyweight
    pub weight_kg: f64,
    /// Repetitions performed
    pub reps: u32,
    /// Whether the set was finished
    pub completed: bool,
}

/// A strength exercise with its sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Exercise name
    pub name: String,
    /// Performed sets
    pub sets: Vec<StrengthSet>,
}

/// Strength session payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthData {
    /// Exercises in order performed
    pub exercises: Vec<ExerciseEntry>,
}

/// Cardio session payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioData {
    /// Activity label (running, cycling, ...)
    pub cardio_type: String,
    /// Distance covered (km)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Average heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_pulse: Option<u32>,
    /// Maximum heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pulse: Option<u32>,
    /// Average pace, free text such as "5:30/km"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_pace: Option<String>,
}

/// Exactly one of the two payload shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkoutDetails {
    /// Strength payload, serialized as `strengthData`
    #[serde(rename = "strengthData")]
    Strength(StrengthData),
    /// Cardio payload, serialized as `cardioData`
    #[serde(rename = "cardioData")]
    Cardio(CardioData),
}

impl WorkoutDetails {
    /// Type tag implied by the payload
    #[must_use]
    pub const fn workout_type(&self) -> WorkoutType {
        match self {
            Self::Strength(_) => WorkoutType::Strength,
            Self::Cardio(_) => WorkoutType::Cardio,
        }
    }
}

/// A single workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    /// Type tag, always consistent with `details`
    pub workout_type: WorkoutType,
    /// Start time (`HH:MM`)
    pub start_time: String,
    /// End time (`HH:MM`)
    pub end_time: String,
    /// Calories burned
    pub estimated_calories: i64,
    /// Certainty in [0, 1]
    pub confidence: f64,
    /// Strength or cardio payload
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

impl WorkoutSession {
    /// Build a session whose type tag is derived from the payload
    #[must_use]
    pub fn new(
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        estimated_calories: i64,
        confidence: f64,
        details: WorkoutDetails,
    ) -> Self {
        Self {
            workout_type: details.workout_type(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            estimated_calories,
            confidence,
            details,
        }
    }
}

/// Workout logged by voice; `workout_data` is `None` when the vendor reported no payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceWorkout {
    /// The session, if any
    pub workout_data: Option<WorkoutSession>,
    /// What the vendor heard, empty when not reported
    pub transcription: String,
}
