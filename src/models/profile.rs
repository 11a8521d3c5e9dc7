// ABOUTME: User profile model collected by the routine form
// ABOUTME: UserProfile plus Sex, Diet, Goal, and Experience enums with range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Biological sex, used for BMI and calorie guidance
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

/// Diet type the meal plan must respect
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    /// Eats everything
    Omnivore,
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
}

/// Training objective
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Gain muscle mass
    BuildMuscle,
    /// Reduce body weight
    LoseWeight,
    /// Improve muscle definition
    DefineMuscles,
}

/// Prior training experience
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    /// First time in a gym
    Beginner,
    /// Some training history
    Intermediate,
    /// Long training history
    Advanced,
}

/// Form options shared by the enums: wire value plus human label
macro_rules! form_options {
    ($ty:ty { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in form display order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Value used in form fields and JSON
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Human-readable label embedded in prompts and pages
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str(self.label())
            }
        }
    };
}

form_options!(Sex {
    Male => ("male", "Male"),
    Female => ("female", "Female"),
});

form_options!(Diet {
    Omnivore => ("omnivore", "Omnivore"),
    Vegetarian => ("vegetarian", "Vegetarian"),
    Vegan => ("vegan", "Vegan"),
});

form_options!(Goal {
    BuildMuscle => ("build_muscle", "Build muscle"),
    LoseWeight => ("lose_weight", "Lose weight"),
    DefineMuscles => ("define_muscles", "Define muscles"),
});

form_options!(Experience {
    Beginner => ("beginner", "Beginner"),
    Intermediate => ("intermediate", "Intermediate"),
    Advanced => ("advanced", "Advanced"),
});

/// Physical attributes and training preferences for one routine request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Age in years
    pub age: u32,
    /// Height in centimeters
    pub height_cm: u32,
    /// Biological sex
    pub sex: Sex,
    /// Training days per week
    pub training_days: u32,
    /// Diet type
    pub diet: Diet,
    /// Training objective
    pub goal: Goal,
    /// Whether the user trains at a gym
    pub gym_access: bool,
    /// Prior experience
    pub experience: Experience,
    /// Underlying illness or condition, may be empty
    #[serde(default)]
    pub medical_condition: String,
}

impl UserProfile {
    /// Accepted ages
    pub const AGE_RANGE: RangeInclusive<u32> = 10..=100;
    /// Accepted heights in centimeters
    pub const HEIGHT_RANGE: RangeInclusive<u32> = 100..=300;
    /// Accepted training days per week
    pub const TRAINING_DAYS_RANGE: RangeInclusive<u32> = 1..=7;

    /// Check the numeric fields against their bounds
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the first offending field.
    pub fn validate(&self) -> AppResult<()> {
        let checks = [
            ("age", self.age, Self::AGE_RANGE),
            ("height_cm", self.height_cm, Self::HEIGHT_RANGE),
            ("training_days", self.training_days, Self::TRAINING_DAYS_RANGE),
        ];

        for (field, value, range) in checks {
            if !range.contains(&value) {
                return Err(AppError::out_of_range(field, *range.start(), *range.end()));
            }
        }
        Ok(())
    }
}

impl Default for UserProfile {
    /// Initial form values
    fn default() -> Self {
        Self {
            age: 25,
            height_cm: 170,
            sex: Sex::Male,
            training_days: 3,
            diet: Diet::Omnivore,
            goal: Goal::BuildMuscle,
            gym_access: false,
            experience: Experience::Beginner,
            medical_condition: String::new(),
        }
    }
}
