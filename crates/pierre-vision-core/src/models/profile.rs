// ABOUTME: Stored user profile hints consumed by biometric fallback synthesis
// ABOUTME: Weight, height, age, and gender with lossy gender parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Biological sex used by the Mifflin–St Jeor formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

impl Gender {
    /// Parse gender from string, `None` when unrecognized
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "мужской" => Some(Self::Male),
            "female" | "f" | "woman" | "женский" => Some(Self::Female),
            _ => None,
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Profile values stored for the requesting user; every field is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
    /// Height (cm)
    pub height_cm: Option<f64>,
    /// Age (years)
    pub age: Option<u32>,
    /// Gender
    pub gender: Option<Gender>,
}

impl UserProfile {
    /// BMI from stored weight and height, when both are known and positive
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        match (self.weight_kg, self.height_cm) {
            (Some(weight), Some(height)) if weight > 0.0 && height > 0.0 => {
                let height_m = height / 100.0;
                Some(weight / (height_m * height_m))
            }
            _ => None,
        }
    }
}
