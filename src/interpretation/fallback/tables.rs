// ABOUTME: Data-driven lookup tables used when vendor output cannot be interpreted
// ABOUTME: Meal dishes, time bands, BMI buckets, food and exercise keywords, workout defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fallback tables
//!
//! Built-in defaults cover every table. A JSON file may override any subset of
//! them at startup; missing sections keep their defaults. Tables are validated
//! before installation and are read-only afterwards.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use pierre_vision_core::constants::{bmi, bmr};
use pierre_vision_core::errors::ConfigError;
use pierre_vision_core::models::{
    BmiCategory, FoodItem, MealType, NutritionPer100, WeightUnit, WorkoutType,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

static FALLBACK_TABLES: OnceLock<FallbackTables> = OnceLock::new();

/// A dish with a typical portion and its nutrition per 100 units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishProfile {
    /// Display name
    pub name: String,
    /// Typical portion size
    pub weight: f64,
    /// Unit of `weight`
    #[serde(default)]
    pub unit: WeightUnit,
    /// Nutrition per 100 g or 100 ml
    pub nutrition: NutritionPer100,
}

impl DishProfile {
    fn new(name: &str, weight: f64, unit: WeightUnit, [calories, proteins, fats, carbs]: [f64; 4]) -> Self {
        Self {
            name: name.to_owned(),
            weight,
            unit,
            nutrition: NutritionPer100 {
                calories,
                proteins,
                fats,
                carbs,
            },
        }
    }

    /// Food item for this dish with the given portion and confidence
    #[must_use]
    pub fn to_item_with_weight(&self, weight: f64, confidence: f64) -> FoodItem {
        FoodItem::from_portion(self.name.clone(), weight, self.unit, self.nutrition, confidence)
    }

    /// Food item for the dish's typical portion
    #[must_use]
    pub fn to_item(&self, confidence: f64) -> FoodItem {
        self.to_item_with_weight(self.weight, confidence)
    }

    /// Vendor-shaped JSON node for this dish, as the generator would have produced it
    #[must_use]
    pub fn to_vendor_node(&self, confidence: f64) -> Value {
        json!({
            "name": self.name,
            "estimatedWeight": self.weight,
            "weightType": self.unit.as_str(),
            "nutritionPer100g": {
                "calories": self.nutrition.calories,
                "proteins": self.nutrition.proteins,
                "fats": self.nutrition.fats,
                "carbs": self.nutrition.carbs,
            },
            "totalCalories": self.nutrition.total_calories_for(self.weight),
            "confidence": confidence,
        })
    }
}

/// Typical dish for a meal type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDish {
    /// Meal the dish stands in for
    pub meal_type: MealType,
    /// The dish
    pub dish: DishProfile,
}

/// Inclusive local-hour range mapped to a meal type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBand {
    /// First hour of the band (0-23)
    pub first_hour: u32,
    /// Last hour of the band (0-23)
    pub last_hour: u32,
    /// Meal assumed inside the band
    pub meal_type: MealType,
}

impl TimeBand {
    const fn contains(&self, hour: u32) -> bool {
        hour >= self.first_hour && hour <= self.last_hour
    }
}

/// Typical body composition for a BMI range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiBucket {
    /// Exclusive upper bound of the range; `None` for the last bucket
    pub below: Option<f64>,
    /// Category reported for the range
    pub category: BmiCategory,
    /// Body fat percentage
    pub body_fat_percentage: f64,
    /// Muscle percentage
    pub muscle_percentage: f64,
    /// Somatotype label
    pub body_type: String,
    /// Waist circumference (cm)
    pub waist_cm: f64,
    /// Chest circumference (cm)
    pub chest_cm: f64,
    /// Hip circumference (cm)
    pub hip_cm: f64,
    /// Exercise advice
    pub exercise_recommendations: Vec<String>,
    /// Nutrition advice
    pub nutrition_recommendations: Vec<String>,
}

/// Keywords recognizing a dish in free-form text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodKeyword {
    /// Lowercase spellings (any language)
    pub keywords: Vec<String>,
    /// Dish synthesized on a match
    pub dish: DishProfile,
}

/// Keywords recognizing an exercise in free-form text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseKeyword {
    /// Lowercase spellings (any language)
    pub keywords: Vec<String>,
    /// Strength or cardio
    pub workout_type: WorkoutType,
    /// Exercise or cardio type name
    pub name: String,
}

/// Longest default session accepted from a table file (one day)
pub const MAX_WORKOUT_MINUTES: i64 = 24 * 60;

/// Default session synthesized for a workout type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDefault {
    /// Exercise name (strength) or cardio type (cardio)
    pub name: String,
    /// Session length used to derive the start time
    pub duration_minutes: i64,
    /// Calories burned
    pub estimated_calories: i64,
    /// Reps of the single default set (strength only)
    #[serde(default)]
    pub reps: u32,
}

/// Lookup tables for fallback synthesis and keyword reconstruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FallbackTables {
    /// Typical dish per meal type
    pub meal_dishes: Vec<MealDish>,
    /// Local-hour bands used when no meal type is given
    pub time_bands: Vec<TimeBand>,
    /// Meal assumed outside every band
    pub off_hours_meal: MealType,
    /// Body composition by BMI, ordered by ascending upper bound
    pub bmi_buckets: Vec<BmiBucket>,
    /// BMI assumed when weight or height is unknown
    pub neutral_bmi: f64,
    /// BMR assumed when weight, height or age is unknown
    pub neutral_bmr: f64,
    /// Dishes recognizable in free-form text
    pub food_keywords: Vec<FoodKeyword>,
    /// Exercises recognizable in free-form text
    pub exercise_keywords: Vec<ExerciseKeyword>,
    /// Terminal default when no dish is recognized
    pub unspecified_food: DishProfile,
    /// Portion of the terminal default for snacks
    pub unspecified_snack_weight: f64,
    /// Default strength session
    pub strength_default: WorkoutDefault,
    /// Default cardio session
    pub cardio_default: WorkoutDefault,
}

impl Default for FallbackTables {
    fn default() -> Self {
        Self {
            meal_dishes: Self::default_meal_dishes(),
            time_bands: Self::default_time_bands(),
            off_hours_meal: MealType::Snack,
            bmi_buckets: Self::default_bmi_buckets(),
            neutral_bmi: bmi::NEUTRAL,
            neutral_bmr: bmr::NEUTRAL,
            food_keywords: Self::default_food_keywords(),
            exercise_keywords: Self::default_exercise_keywords(),
            unspecified_food: DishProfile::new(
                "Unspecified food",
                150.0,
                WeightUnit::Grams,
                [150.0, 6.0, 6.0, 18.0],
            ),
            unspecified_snack_weight: 100.0,
            strength_default: WorkoutDefault {
                name: "Bodyweight exercise".to_owned(),
                duration_minutes: 45,
                estimated_calories: 200,
                reps: 10,
            },
            cardio_default: WorkoutDefault {
                name: "General cardio".to_owned(),
                duration_minutes: 30,
                estimated_calories: 250,
                reps: 0,
            },
        }
    }
}

impl FallbackTables {
    /// Process-wide tables; built-in defaults unless [`Self::install`] ran first
    pub fn global() -> &'static Self {
        FALLBACK_TABLES.get_or_init(Self::default)
    }

    /// Validate and install tables for the lifetime of the process
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or tables were already installed
    /// (including implicitly by an earlier [`Self::global`] call)
    pub fn install(tables: Self) -> Result<&'static Self, ConfigError> {
        tables.validate()?;
        FALLBACK_TABLES
            .set(tables)
            .map_err(|_| ConfigError::AlreadyInitialized("fallback tables"))?;
        Ok(Self::global())
    }

    /// Load tables from a JSON override file; sections absent from the file keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or fails validation
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        let tables: Self = serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        tables.validate()?;
        info!(
            path = %path.display(),
            food_keywords = tables.food_keywords.len(),
            exercise_keywords = tables.exercise_keywords.len(),
            "Loaded fallback table overrides"
        );
        Ok(tables)
    }

    /// Check structural rules every synthesizer relies on
    ///
    /// # Errors
    ///
    /// Returns an error naming the first violated rule
    pub fn validate(&self) -> Result<(), ConfigError> {
        for meal in MealType::ALL {
            let dish = self
                .dish_for_meal(meal)
                .ok_or(ConfigError::MissingField("meal dish for every meal type"))?;
            Self::validate_dish(dish)?;
        }

        if self
            .time_bands
            .iter()
            .any(|band| band.first_hour > band.last_hour || band.last_hour > 23)
        {
            return Err(ConfigError::InvalidRange("time bands must lie within 0-23"));
        }

        self.validate_bmi_buckets()?;

        if [self.neutral_bmi, self.neutral_bmr]
            .iter()
            .any(|v| v.is_nan() || *v <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange("neutral BMI and BMR must be positive"));
        }

        for entry in &self.food_keywords {
            Self::validate_keywords(&entry.keywords)?;
            Self::validate_dish(&entry.dish)?;
        }
        for entry in &self.exercise_keywords {
            Self::validate_keywords(&entry.keywords)?;
            if entry.name.trim().is_empty() {
                return Err(ConfigError::MissingField("exercise name"));
            }
        }

        Self::validate_dish(&self.unspecified_food)?;
        if self.unspecified_snack_weight <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("snack portion must be positive"));
        }

        for default in [&self.strength_default, &self.cardio_default] {
            if default.name.trim().is_empty() {
                return Err(ConfigError::MissingField("workout default name"));
            }
            if !(1..=MAX_WORKOUT_MINUTES).contains(&default.duration_minutes)
                || default.estimated_calories < 0
            {
                return Err(ConfigError::ValueOutOfRange(
                    "workout default duration and calories",
                ));
            }
        }

        Ok(())
    }

    fn validate_dish(dish: &DishProfile) -> Result<(), ConfigError> {
        if dish.name.trim().is_empty() {
            return Err(ConfigError::MissingField("dish name"));
        }
        if dish.weight <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("dish weight must be positive"));
        }
        let n = &dish.nutrition;
        if [n.calories, n.proteins, n.fats, n.carbs].iter().any(|v| *v < 0.0 || !v.is_finite()) {
            return Err(ConfigError::ValueOutOfRange("dish nutrition must be non-negative"));
        }
        Ok(())
    }

    fn validate_keywords(keywords: &[String]) -> Result<(), ConfigError> {
        if keywords.is_empty() || keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::MissingField("keyword"));
        }
        if keywords.iter().any(|k| *k != k.to_lowercase()) {
            return Err(ConfigError::InvalidRange("keywords must be lowercase"));
        }
        Ok(())
    }

    fn validate_bmi_buckets(&self) -> Result<(), ConfigError> {
        let Some((last, bounded)) = self.bmi_buckets.split_last() else {
            return Err(ConfigError::MissingField("bmi buckets"));
        };
        if last.below.is_some() {
            return Err(ConfigError::InvalidRange("last BMI bucket must be unbounded"));
        }
        let mut previous = f64::NEG_INFINITY;
        for bucket in bounded {
            match bucket.below {
                Some(limit) if limit > previous => previous = limit,
                _ => {
                    return Err(ConfigError::InvalidRange(
                        "BMI buckets must have ascending upper bounds",
                    ))
                }
            }
        }
        if self
            .bmi_buckets
            .iter()
            .any(|b| b.body_fat_percentage < 0.0 || b.muscle_percentage < 0.0)
        {
            return Err(ConfigError::ValueOutOfRange("BMI bucket percentages"));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Meal type for a local hour
    #[must_use]
    pub fn meal_for_hour(&self, hour: u32) -> MealType {
        self.time_bands
            .iter()
            .find(|band| band.contains(hour))
            .map_or(self.off_hours_meal, |band| band.meal_type)
    }

    /// Typical dish for a meal type
    #[must_use]
    pub fn dish_for_meal(&self, meal_type: MealType) -> Option<&DishProfile> {
        self.meal_dishes
            .iter()
            .find(|entry| entry.meal_type == meal_type)
            .map(|entry| &entry.dish)
    }

    /// Bucket whose range contains `value`
    #[must_use]
    pub fn bucket_for_bmi(&self, value: f64) -> Option<&BmiBucket> {
        self.bmi_buckets
            .iter()
            .find(|bucket| bucket.below.is_none_or(|limit| value < limit))
    }

    /// Dish mentioned earliest in lowercase text; longer keywords win ties
    #[must_use]
    pub fn match_food(&self, text_lower: &str) -> Option<&DishProfile> {
        earliest_match(
            self.food_keywords
                .iter()
                .map(|entry| (entry.keywords.as_slice(), &entry.dish)),
            text_lower,
        )
    }

    /// Exercise mentioned earliest in lowercase text; longer keywords win ties
    #[must_use]
    pub fn match_exercise(&self, text_lower: &str) -> Option<&ExerciseKeyword> {
        earliest_match(
            self.exercise_keywords
                .iter()
                .map(|entry| (entry.keywords.as_slice(), entry)),
            text_lower,
        )
    }

    /// Default session for a workout type
    #[must_use]
    pub const fn workout_default(&self, workout_type: WorkoutType) -> &WorkoutDefault {
        match workout_type {
            WorkoutType::Strength => &self.strength_default,
            WorkoutType::Cardio => &self.cardio_default,
        }
    }

    // ------------------------------------------------------------------
    // Built-in content
    // ------------------------------------------------------------------

    fn default_meal_dishes() -> Vec<MealDish> {
        vec![
            MealDish {
                meal_type: MealType::Breakfast,
                dish: DishProfile::new("Oatmeal", 250.0, WeightUnit::Grams, [88.0, 3.0, 1.7, 15.0]),
            },
            MealDish {
                meal_type: MealType::Lunch,
                dish: DishProfile::new(
                    "Borscht",
                    300.0,
                    WeightUnit::Milliliters,
                    [49.0, 1.1, 2.2, 6.7],
                ),
            },
            MealDish {
                meal_type: MealType::Dinner,
                dish: DishProfile::new(
                    "Chicken breast",
                    150.0,
                    WeightUnit::Grams,
                    [165.0, 31.0, 3.6, 0.0],
                ),
            },
            MealDish {
                meal_type: MealType::Snack,
                dish: DishProfile::new("Apple", 150.0, WeightUnit::Grams, [52.0, 0.3, 0.2, 14.0]),
            },
        ]
    }

    fn default_time_bands() -> Vec<TimeBand> {
        vec![
            TimeBand {
                first_hour: 6,
                last_hour: 10,
                meal_type: MealType::Breakfast,
            },
            TimeBand {
                first_hour: 11,
                last_hour: 15,
                meal_type: MealType::Lunch,
            },
            TimeBand {
                first_hour: 16,
                last_hour: 22,
                meal_type: MealType::Dinner,
            },
        ]
    }

    fn default_bmi_buckets() -> Vec<BmiBucket> {
        vec![
            BmiBucket {
                below: Some(bmi::NORMAL_MIN),
                category: BmiCategory::Underweight,
                body_fat_percentage: 14.0,
                muscle_percentage: 38.0,
                body_type: "Ectomorph".to_owned(),
                waist_cm: 68.0,
                chest_cm: 86.0,
                hip_cm: 88.0,
                exercise_recommendations: strings(&[
                    "Strength training with progressive overload 3 times a week",
                    "Compound lifts: squats, deadlifts and bench press",
                    "Keep long cardio sessions short to preserve energy",
                ]),
                nutrition_recommendations: strings(&[
                    "Eat in a moderate calorie surplus of 300-500 kcal",
                    "Aim for 1.6-2.0 g of protein per kg of body weight",
                    "Add calorie-dense snacks such as nuts and dairy",
                ]),
            },
            BmiBucket {
                below: Some(bmi::OVERWEIGHT_MIN),
                category: BmiCategory::Normal,
                body_fat_percentage: 20.0,
                muscle_percentage: 35.0,
                body_type: "Mesomorph".to_owned(),
                waist_cm: 80.0,
                chest_cm: 96.0,
                hip_cm: 96.0,
                exercise_recommendations: strings(&[
                    "Mix strength training and cardio 3-4 times a week",
                    "Add one interval session per week",
                    "Keep the daily step count above 8,000",
                ]),
                nutrition_recommendations: strings(&[
                    "Eat at maintenance calories",
                    "Keep protein at 1.4-1.6 g per kg of body weight",
                    "Fill half of every plate with vegetables",
                ]),
            },
            BmiBucket {
                below: Some(bmi::OBESE_MIN),
                category: BmiCategory::Overweight,
                body_fat_percentage: 27.0,
                muscle_percentage: 31.0,
                body_type: "Endomorph".to_owned(),
                waist_cm: 92.0,
                chest_cm: 104.0,
                hip_cm: 106.0,
                exercise_recommendations: strings(&[
                    "Cardio 4-5 times a week for 30-45 minutes",
                    "Full-body strength training twice a week",
                    "Walk at least 10,000 steps a day",
                ]),
                nutrition_recommendations: strings(&[
                    "Eat in a calorie deficit of 300-500 kcal",
                    "Cut sugary drinks and refined carbohydrates",
                    "Include lean protein and fiber in every meal",
                ]),
            },
            BmiBucket {
                below: None,
                category: BmiCategory::Obese,
                body_fat_percentage: 34.0,
                muscle_percentage: 27.0,
                body_type: "Endomorph".to_owned(),
                waist_cm: 104.0,
                chest_cm: 114.0,
                hip_cm: 118.0,
                exercise_recommendations: strings(&[
                    "Start with low-impact cardio such as walking, cycling or swimming",
                    "Light strength training twice a week",
                    "Increase activity gradually and consult a physician",
                ]),
                nutrition_recommendations: strings(&[
                    "Eat in a calorie deficit of about 500 kcal under medical guidance",
                    "Track meals to keep portion sizes under control",
                    "Replace processed foods with whole foods",
                ]),
            },
        ]
    }

    fn default_food_keywords() -> Vec<FoodKeyword> {
        use WeightUnit::{Grams as G, Milliliters as Ml};

        let entry = |keywords: &[&str], name: &str, weight: f64, unit: WeightUnit, n: [f64; 4]| {
            FoodKeyword {
                keywords: strings(keywords),
                dish: DishProfile::new(name, weight, unit, n),
            }
        };

        vec![
            // Drinks
            entry(&["coffee", "кофе", "americano", "американо", "espresso", "эспрессо"], "Coffee", 250.0, Ml, [2.0, 0.3, 0.0, 0.0]),
            entry(&["latte", "латте", "cappuccino", "капучино"], "Latte", 250.0, Ml, [54.0, 3.0, 2.8, 4.4]),
            entry(&["tea", "чай", "чая"], "Tea", 250.0, Ml, [1.0, 0.0, 0.0, 0.2]),
            entry(&["juice", "orange juice", "сок", "сока"], "Orange juice", 250.0, Ml, [45.0, 0.7, 0.2, 10.4]),
            entry(&["milk", "молоко", "молока"], "Milk", 250.0, Ml, [52.0, 2.9, 2.5, 4.7]),
            entry(&["kefir", "кефир"], "Kefir", 250.0, Ml, [53.0, 2.9, 2.5, 4.0]),
            entry(&["cola", "coke", "кола"], "Cola", 330.0, Ml, [42.0, 0.0, 0.0, 10.6]),
            entry(&["smoothie", "смузи"], "Fruit smoothie", 300.0, Ml, [60.0, 1.0, 0.5, 13.0]),
            // Soups
            entry(&["borscht", "borsch", "борщ"], "Borscht", 300.0, Ml, [49.0, 1.1, 2.2, 6.7]),
            entry(&["chicken soup", "куриный суп"], "Chicken soup", 300.0, Ml, [36.0, 2.5, 1.2, 3.5]),
            entry(&["soup", "суп", "супа"], "Soup", 300.0, Ml, [40.0, 2.0, 1.5, 5.0]),
            // Staples
            entry(&["rice", "рис", "риса", "рисом"], "Rice", 150.0, G, [130.0, 2.7, 0.3, 28.0]),
            entry(&["buckwheat", "гречка", "гречку", "гречки"], "Buckwheat", 150.0, G, [110.0, 4.2, 1.1, 21.3]),
            entry(&["pasta", "spaghetti", "макароны", "паста", "спагетти"], "Pasta", 200.0, G, [158.0, 5.8, 0.9, 31.0]),
            entry(&["bread", "toast", "хлеб", "тост"], "Bread", 50.0, G, [265.0, 9.0, 3.2, 49.0]),
            entry(&["oatmeal", "porridge", "овсянка", "овсянку", "каша", "кашу"], "Oatmeal", 250.0, G, [88.0, 3.0, 1.7, 15.0]),
            entry(&["potato", "potatoes", "mashed potatoes", "картошка", "картошку", "картофель", "пюре"], "Potatoes", 200.0, G, [87.0, 2.0, 0.1, 20.0]),
            entry(&["sandwich", "бутерброд"], "Sandwich", 150.0, G, [250.0, 11.0, 10.0, 28.0]),
            entry(&["pizza", "пицца", "пиццу"], "Pizza", 200.0, G, [266.0, 11.0, 10.0, 33.0]),
            entry(&["dumplings", "pelmeni", "пельмени"], "Dumplings", 200.0, G, [275.0, 12.0, 13.0, 28.0]),
            entry(&["pancake", "pancakes", "блины", "блинчики", "сырники"], "Pancakes", 150.0, G, [227.0, 6.0, 9.0, 30.0]),
            // Produce
            entry(&["apple", "яблоко", "яблока"], "Apple", 150.0, G, [52.0, 0.3, 0.2, 14.0]),
            entry(&["banana", "банан"], "Banana", 120.0, G, [89.0, 1.1, 0.3, 22.8]),
            entry(&["orange", "апельсин"], "Orange", 150.0, G, [47.0, 0.9, 0.1, 11.8]),
            entry(&["salad", "салат"], "Salad", 200.0, G, [20.0, 1.2, 0.2, 3.6]),
            entry(&["vegetables", "овощи"], "Vegetables", 200.0, G, [35.0, 1.5, 0.3, 7.0]),
            // Dairy and eggs
            entry(&["cottage cheese", "творог"], "Cottage cheese", 150.0, G, [121.0, 17.0, 5.0, 1.8]),
            entry(&["yogurt", "yoghurt", "йогурт"], "Yogurt", 150.0, G, [66.0, 5.0, 1.5, 8.0]),
            entry(&["cheese", "сыр", "сыра"], "Cheese", 30.0, G, [350.0, 25.0, 27.0, 0.0]),
            entry(&["egg", "eggs", "omelette", "omelet", "яйцо", "яйца", "яичница", "омлет"], "Eggs", 100.0, G, [155.0, 13.0, 11.0, 1.1]),
            // Meat and fish
            entry(&["chicken", "курица", "курицу", "куриная грудка"], "Chicken breast", 150.0, G, [165.0, 31.0, 3.6, 0.0]),
            entry(&["steak", "beef", "говядина", "стейк"], "Beef steak", 150.0, G, [250.0, 26.0, 15.0, 0.0]),
            entry(&["pork", "свинина"], "Pork", 150.0, G, [242.0, 27.0, 14.0, 0.0]),
            entry(&["fish", "salmon", "рыба", "рыбу", "лосось"], "Fish", 150.0, G, [208.0, 20.0, 13.0, 0.0]),
            entry(&["cutlet", "котлета", "котлеты", "котлету"], "Cutlet", 100.0, G, [220.0, 15.0, 14.0, 9.0]),
            // Desserts
            entry(&["chocolate", "шоколад"], "Chocolate", 50.0, G, [546.0, 4.9, 31.0, 61.0]),
            entry(&["cake", "торт", "пирожное"], "Cake", 100.0, G, [350.0, 5.0, 18.0, 45.0]),
            entry(&["ice cream", "мороженое"], "Ice cream", 100.0, G, [207.0, 3.5, 11.0, 24.0]),
            entry(&["cookie", "cookies", "печенье"], "Cookies", 50.0, G, [480.0, 6.0, 22.0, 65.0]),
        ]
    }

    fn default_exercise_keywords() -> Vec<ExerciseKeyword> {
        use WorkoutType::{Cardio, Strength};

        let entry = |keywords: &[&str], workout_type: WorkoutType, name: &str| ExerciseKeyword {
            keywords: strings(keywords),
            workout_type,
            name: name.to_owned(),
        };

        vec![
            entry(&["run", "running", "ran", "jog", "jogging", "бег", "пробежка", "бегал", "бегала", "пробежал", "пробежала"], Cardio, "Running"),
            entry(&["treadmill", "беговая дорожка", "дорожке"], Cardio, "Treadmill"),
            entry(&["cycling", "bike", "biking", "велосипед", "велотренажер"], Cardio, "Cycling"),
            entry(&["swim", "swimming", "плавание", "плавал", "плавала", "бассейн"], Cardio, "Swimming"),
            entry(&["walk", "walking", "hiking", "ходьба", "прогулка", "гулял", "гуляла"], Cardio, "Walking"),
            entry(&["rowing", "гребля"], Cardio, "Rowing"),
            entry(&["elliptical", "эллипс", "эллипсоид"], Cardio, "Elliptical"),
            entry(&["jump rope", "skipping", "скакалка", "скакалку"], Cardio, "Jump rope"),
            entry(&["cardio", "кардио"], Cardio, "General cardio"),
            entry(&["squat", "squats", "присед", "приседания"], Strength, "Squat"),
            entry(&["bench press", "bench", "жим лежа", "жим лёжа", "жим"], Strength, "Bench press"),
            entry(&["deadlift", "deadlifts", "становая", "становую"], Strength, "Deadlift"),
            entry(&["push-up", "push-ups", "pushups", "отжимания", "отжимался", "отжималась"], Strength, "Push-ups"),
            entry(&["pull-up", "pull-ups", "pullups", "подтягивания", "подтягивался"], Strength, "Pull-ups"),
            entry(&["lunge", "lunges", "выпады"], Strength, "Lunges"),
            entry(&["plank", "планка", "планку"], Strength, "Plank"),
            entry(&["curl", "curls", "бицепс"], Strength, "Biceps curl"),
            entry(&["gym", "weights", "dumbbell", "dumbbells", "barbell", "штанга", "штангу", "гантели", "тренажер"], Strength, "Strength training"),
        ]
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

/// Entry whose keyword occurs earliest in `text`; ties go to the longer keyword, then table order
fn earliest_match<'a, T: ?Sized>(
    entries: impl Iterator<Item = (&'a [String], &'a T)>,
    text: &str,
) -> Option<&'a T> {
    let mut best: Option<(usize, usize, &'a T)> = None;
    for (keywords, value) in entries {
        for keyword in keywords {
            let Some(position) = find_keyword(text, keyword) else {
                continue;
            };
            let better = best.is_none_or(|(best_pos, best_len, _)| {
                position < best_pos || (position == best_pos && keyword.len() > best_len)
            });
            if better {
                best = Some((position, keyword.len(), value));
            }
        }
    }
    best.map(|(_, _, value)| value)
}

/// Plural endings accepted after an ASCII keyword
const ASCII_PLURAL_SUFFIXES: [&str; 3] = ["", "s", "es"];

/// Byte offset of the first occurrence of `keyword` that starts on a word boundary
///
/// ASCII keywords must also end on a boundary, optionally after a plural
/// ending ("apples", "sandwiches"), so "fish" does not match "fishing".
/// Non-ASCII keywords of four or more characters match as word prefixes so
/// that case endings are found ("борща" for "борщ").
pub(crate) fn find_keyword(text: &str, keyword: &str) -> Option<usize> {
    if keyword.is_empty() {
        return None;
    }
    let ascii = keyword.is_ascii();
    let prefix_ok = !ascii && keyword.chars().count() >= 4;
    let at_boundary = |position: usize| {
        text[position..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric())
    };

    let mut from = 0;
    while let Some(offset) = text[from..].find(keyword) {
        let start = from + offset;
        let end = start + keyword.len();
        let starts_word = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let ends_word = if ascii {
            ASCII_PLURAL_SUFFIXES.iter().any(|suffix| {
                text[end..].starts_with(suffix) && at_boundary(end + suffix.len())
            })
        } else {
            prefix_ok || at_boundary(end)
        };
        if starts_word && ends_word {
            return Some(start);
        }
        from = start
            + text[start..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
    None
}
