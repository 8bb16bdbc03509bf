// ABOUTME: Food analysis models for photo scans and voice food logging
// ABOUTME: FoodItem, NutritionPer100, WeightUnit, MealType, FoodAnalysis, and VoiceFood
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// All meal types in day order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Parse meal type from string, `None` when unrecognized
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "завтрак" => Some(Self::Breakfast),
            "lunch" | "обед" => Some(Self::Lunch),
            "dinner" | "ужин" => Some(Self::Dinner),
            "snack" | "перекус" => Some(Self::Snack),
            _ => None,
        }
    }

    /// String representation used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

/// Unit of `estimated_weight`: solid mass or liquid volume
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WeightUnit {
    /// Grams
    #[default]
    #[serde(rename = "g")]
    Grams,
    /// Millilitres
    #[serde(rename = "ml")]
    Milliliters,
}

impl WeightUnit {
    /// Normalize a free-text unit; anything that is not a volume is treated as grams
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ml" | "l" | "milliliter" | "milliliters" | "millilitre" | "millilitres" | "мл" => {
                Self::Milliliters
            }
            _ => Self::Grams,
        }
    }

    /// Wire tag
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Milliliters => "ml",
        }
    }
}

/// Macro nutrients per 100 g or 100 ml
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionPer100 {
    /// Energy (kcal)
    pub calories: f64,
    /// Proteins (g)
    pub proteins: f64,
    /// Fats (g)
    pub fats: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
}

impl NutritionPer100 {
    /// Total calories for a portion: `round(calories * weight / 100)`
    #[must_use]
    pub fn total_calories_for(&self, weight: f64) -> i64 {
        (self.calories * weight / 100.0).round() as i64
    }
}

/// Single recognized food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Display name
    pub name: String,
    /// Estimated portion size in `weight_type` units
    pub estimated_weight: f64,
    /// Unit of the portion size
    pub weight_type: WeightUnit,
    /// Macro nutrients per 100 units
    #[serde(rename = "nutritionPer100g")]
    pub nutrition_per_100g: NutritionPer100,
    /// Calories for the whole portion
    pub total_calories: i64,
    /// Certainty of the item in [0, 1]
    pub confidence: f64,
}

impl FoodItem {
    /// Build an item whose total calories are derived from the portion
    #[must_use]
    pub fn from_portion(
        name: impl Into<String>,
        estimated_weight: f64,
        weight_type: WeightUnit,
        nutrition: NutritionPer100,
        confidence: f64,
    ) -> Self {
        Self {
            name: name.into(),
            estimated_weight,
            weight_type,
            total_calories: nutrition.total_calories_for(estimated_weight),
            nutrition_per_100g: nutrition,
            confidence,
        }
    }
}

/// Result of a food photo analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    /// Recognized items
    pub food_items: Vec<FoodItem>,
    /// Calories of the whole plate
    pub estimated_calories: i64,
    /// Free-text description of the plate
    pub full_description: String,
}

/// Food logged by voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceFood {
    /// Recognized items
    pub food_items: Vec<FoodItem>,
    /// Meal the items belong to
    pub meal_type: MealType,
    /// What the vendor heard, empty when not reported
    pub transcription: String,
}

/// Sum of item totals, saturating at the `i64` bounds
#[must_use]
pub fn sum_calories(items: &[FoodItem]) -> i64 {
    items
        .iter()
        .fold(0_i64, |total, item| total.saturating_add(item.total_calories))
}
