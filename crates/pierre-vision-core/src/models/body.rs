// ABOUTME: Body composition analysis model with BMI and BMR categorization
// ABOUTME: BodyAnalysis record plus BmiCategory and BmrCategory label enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::{bmi, bmr};

/// BMI bucket label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    /// BMI below 20
    Underweight,
    /// BMI in [20, 25)
    Normal,
    /// BMI in [25, 30)
    Overweight,
    /// BMI of 30 and above
    Obese,
}

impl BmiCategory {
    /// Bucket a BMI value
    #[must_use]
    pub fn from_bmi(value: f64) -> Self {
        if value < bmi::NORMAL_MIN {
            Self::Underweight
        } else if value < bmi::OVERWEIGHT_MIN {
            Self::Normal
        } else if value < bmi::OBESE_MIN {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Parse a vendor-supplied label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "underweight" => Some(Self::Underweight),
            "normal" | "normal weight" | "healthy" => Some(Self::Normal),
            "overweight" => Some(Self::Overweight),
            "obese" | "obesity" => Some(Self::Obese),
            _ => None,
        }
    }
}

/// BMR level label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BmrCategory {
    /// Below 1400 kcal/day
    Low,
    /// 1400 to 2000 kcal/day
    Normal,
    /// Above 2000 kcal/day
    High,
}

impl BmrCategory {
    /// Categorize a BMR value in kcal/day
    #[must_use]
    pub fn from_bmr(value: f64) -> Self {
        if value < bmr::LOW_BELOW {
            Self::Low
        } else if value > bmr::HIGH_ABOVE {
            Self::High
        } else {
            Self::Normal
        }
    }

    /// Parse a vendor-supplied label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "normal" | "medium" | "average" => Some(Self::Normal),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Result of a body photo analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAnalysis {
    /// Estimated body fat percentage
    pub body_fat_percentage: f64,
    /// Estimated muscle mass percentage
    pub muscle_percentage: f64,
    /// Body mass index
    pub bmi: f64,
    /// BMI bucket
    pub bmi_category: BmiCategory,
    /// Free-text body type (e.g. "Mesomorph")
    pub body_type: String,
    /// Estimated waist circumference (cm)
    pub estimated_waist_cm: f64,
    /// Estimated chest circumference (cm)
    pub estimated_chest_cm: f64,
    /// Estimated hip circumference (cm)
    pub estimated_hip_cm: f64,
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// BMR level
    pub bmr_category: BmrCategory,
    /// Ordered exercise suggestions
    pub exercise_recommendations: Vec<String>,
    /// Ordered nutrition suggestions
    pub nutrition_recommendations: Vec<String>,
    /// Certainty of the estimates in [0, 1]
    pub confidence: f64,
    /// Free-text summary
    pub full_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_bucket_edges() {
        assert_eq!(BmiCategory::from_bmi(19.99), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(20.0), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_bmr_category_edges() {
        assert_eq!(BmrCategory::from_bmr(1399.0), BmrCategory::Low);
        assert_eq!(BmrCategory::from_bmr(1400.0), BmrCategory::Normal);
        assert_eq!(BmrCategory::from_bmr(2000.0), BmrCategory::Normal);
        assert_eq!(BmrCategory::from_bmr(2000.5), BmrCategory::High);
    }
}
