// ABOUTME: Request context carried through interpretation and fallback synthesis
// ABOUTME: Requested meal type, workout hint, user profile, and the local time of the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use pierre_vision_core::models::{MealType, UserProfile, WorkoutType};

use super::fallback::FallbackTables;

/// Inputs available to the pipeline besides the vendor text
///
/// Local time is part of the context rather than read from the system clock so
/// that interpretation is a pure function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpretationContext {
    /// Meal type the user selected, if any
    pub meal_type: Option<MealType>,
    /// Workout type the user selected, if any
    pub workout_hint: Option<WorkoutType>,
    /// Stored profile values
    pub profile: UserProfile,
    /// Local wall-clock time of the request
    pub local_time: NaiveDateTime,
}

impl InterpretationContext {
    /// Context with only the request time set
    #[must_use]
    pub fn at(local_time: NaiveDateTime) -> Self {
        Self {
            meal_type: None,
            workout_hint: None,
            profile: UserProfile::default(),
            local_time,
        }
    }

    /// Set the requested meal type
    #[must_use]
    pub const fn with_meal_type(mut self, meal_type: Option<MealType>) -> Self {
        self.meal_type = meal_type;
        self
    }

    /// Set the workout type hint
    #[must_use]
    pub const fn with_workout_hint(mut self, workout_hint: Option<WorkoutType>) -> Self {
        self.workout_hint = workout_hint;
        self
    }

    /// Set the user profile
    #[must_use]
    pub const fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Requested meal type, or the one implied by the local hour
    #[must_use]
    pub fn effective_meal_type(&self, tables: &FallbackTables) -> MealType {
        self.meal_type
            .unwrap_or_else(|| tables.meal_for_hour(self.local_time.hour()))
    }

    /// Local time formatted as `HH:MM`
    #[must_use]
    pub fn clock_time(&self) -> String {
        self.local_time.format("%H:%M").to_string()
    }

    /// `HH:MM` of the local time shifted back by `minutes`
    ///
    /// Shifts chrono cannot represent leave the local time unchanged.
    #[must_use]
    pub fn clock_time_minutes_ago(&self, minutes: i64) -> String {
        TimeDelta::try_minutes(minutes)
            .and_then(|delta| self.local_time.checked_sub_signed(delta))
            .map_or_else(|| self.clock_time(), |start| start.format("%H:%M").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx_at(hour: u32, minute: u32) -> InterpretationContext {
        let time = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap();
        InterpretationContext::at(time)
    }

    #[test]
    fn minutes_ago_wraps_past_midnight() {
        assert_eq!(ctx_at(0, 20).clock_time_minutes_ago(30), "23:50");
        assert_eq!(ctx_at(18, 30).clock_time_minutes_ago(45), "17:45");
    }

    #[test]
    fn unrepresentable_shift_keeps_local_time() {
        let ctx = ctx_at(9, 15);
        assert_eq!(ctx.clock_time_minutes_ago(i64::MAX), "09:15");
        assert_eq!(ctx.clock_time_minutes_ago(9_000_000_000_000_000), "09:15");
        assert_eq!(ctx.clock_time_minutes_ago(i64::MIN), "09:15");
    }
}
