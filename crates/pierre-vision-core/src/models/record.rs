// ABOUTME: Tagged union over the four domain record kinds
// ABOUTME: DomainRecord serialization tag and per-record confidence inspection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BodyAnalysis, FoodAnalysis, VoiceFood, VoiceWorkout};

/// Record kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Photo-based food analysis
    FoodAnalysis,
    /// Photo-based body analysis
    BodyAnalysis,
    /// Voice-logged workout
    VoiceWorkout,
    /// Voice-logged food
    VoiceFood,
}

impl RecordKind {
    /// Stable identifier used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAnalysis => "food_analysis",
            Self::BodyAnalysis => "body_analysis",
            Self::VoiceWorkout => "voice_workout",
            Self::VoiceFood => "voice_food",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical record produced by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainRecord {
    /// Photo-based food analysis
    FoodAnalysis(FoodAnalysis),
    /// Photo-based body analysis
    BodyAnalysis(BodyAnalysis),
    /// Voice-logged workout
    VoiceWorkout(VoiceWorkout),
    /// Voice-logged food
    VoiceFood(VoiceFood),
}

impl DomainRecord {
    /// Kind of this record
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::FoodAnalysis(_) => RecordKind::FoodAnalysis,
            Self::BodyAnalysis(_) => RecordKind::BodyAnalysis,
            Self::VoiceWorkout(_) => RecordKind::VoiceWorkout,
            Self::VoiceFood(_) => RecordKind::VoiceFood,
        }
    }

    /// Every confidence value carried by the record or its items
    #[must_use]
    pub fn confidences(&self) -> Vec<f64> {
        match self {
            Self::FoodAnalysis(analysis) => analysis
                .food_items
                .iter()
                .map(|item| item.confidence)
                .collect(),
            Self::VoiceFood(food) => food.food_items.iter().map(|item| item.confidence).collect(),
            Self::BodyAnalysis(body) => vec![body.confidence],
            Self::VoiceWorkout(workout) => workout
                .workout_data
                .iter()
                .map(|session| session.confidence)
                .collect(),
        }
    }
}

impl From<FoodAnalysis> for DomainRecord {
    fn from(record: FoodAnalysis) -> Self {
        Self::FoodAnalysis(record)
    }
}

impl From<BodyAnalysis> for DomainRecord {
    fn from(record: BodyAnalysis) -> Self {
        Self::BodyAnalysis(record)
    }
}

impl From<VoiceWorkout> for DomainRecord {
    fn from(record: VoiceWorkout) -> Self {
        Self::VoiceWorkout(record)
    }
}

impl From<VoiceFood> for DomainRecord {
    fn from(record: VoiceFood) -> Self {
        Self::VoiceFood(record)
    }
}
