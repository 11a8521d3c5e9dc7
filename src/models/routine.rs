// ABOUTME: Generated routine models and normalization into the renderer's record shape
// ABOUTME: Accepts plain text or loosely structured records with English or Spanish keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Routine Models
//!
//! A [`GeneratedRoutine`] is whatever came back from the model or the API
//! caller: usually prose, sometimes a partial record. [`normalize`] turns it
//! into a [`NormalizedRoutine`] where every field has a value and an empty
//! value means "omit this section".

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::constants::document::DEFAULT_TITLE;

/// Raw routine as produced upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedRoutine {
    /// Unstructured prose (the common case)
    Text(String),
    /// Structured record with optional fields
    Record(RoutineRecord),
}

/// Structured routine where every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutineRecord {
    /// Document title
    #[serde(alias = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Day label to exercise names, in document order
    #[serde(
        alias = "dias_entrenamiento",
        with = "ordered_days",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub days: Vec<TrainingDay>,
    /// Per-exercise prescriptions
    #[serde(alias = "ejercicios", skip_serializing_if = "Vec::is_empty")]
    pub exercises: Vec<ExerciseDetail>,
    /// Free-text nutrition guidance
    #[serde(alias = "plan_alimentacion", skip_serializing_if = "Option::is_none")]
    pub nutrition_plan: Option<String>,
}

/// One entry of the day mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingDay {
    /// Day label (e.g. "Monday", "Push A")
    pub day: String,
    /// Exercise names in list order
    pub exercises: Vec<String>,
}

impl TrainingDay {
    /// Create a day entry
    #[must_use]
    pub fn new(day: impl Into<String>, exercises: Vec<String>) -> Self {
        Self {
            day: day.into(),
            exercises,
        }
    }
}

/// Sets or repetitions: a number or free text such as `"8-12"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prescription {
    /// Whole number
    Count(i64),
    /// Fractional number
    Decimal(f64),
    /// Free text
    Text(String),
}

impl Display for Prescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Decimal(x) if x.fract().abs() < f64::EPSILON => write!(f, "{x:.1}"),
            Self::Decimal(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Prescription {
    fn from(n: i64) -> Self {
        Self::Count(n)
    }
}

impl From<&str> for Prescription {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// Exercise prescription; any sub-field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseDetail {
    /// Exercise name
    #[serde(alias = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of sets
    #[serde(alias = "series", skip_serializing_if = "Option::is_none")]
    pub sets: Option<Prescription>,
    /// Repetitions per set
    #[serde(alias = "repeticiones", skip_serializing_if = "Option::is_none")]
    pub reps: Option<Prescription>,
}

impl ExerciseDetail {
    /// Create a fully specified exercise
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        sets: impl Into<Prescription>,
        reps: impl Into<Prescription>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            sets: Some(sets.into()),
            reps: Some(reps.into()),
        }
    }

    /// Paragraph text; missing sub-fields render as empty strings
    #[must_use]
    pub fn summary_line(&self) -> String {
        let sets = self.sets.as_ref().map(ToString::to_string).unwrap_or_default();
        let reps = self.reps.as_ref().map(ToString::to_string).unwrap_or_default();
        format!(
            "{}: {sets} series de {reps} repeticiones",
            self.name.as_deref().unwrap_or_default()
        )
    }
}

/// Fully defaulted routine consumed by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRoutine {
    /// Document title, never empty
    pub title: String,
    /// Day mapping; may be empty
    pub days: Vec<TrainingDay>,
    /// Exercise prescriptions; may be empty
    pub exercises: Vec<ExerciseDetail>,
    /// Nutrition text; may be empty
    pub nutrition_plan: String,
}

impl NormalizedRoutine {
    /// (day, exercise) pairs in mapping order then list order
    ///
    /// Days with no exercises contribute nothing.
    pub fn table_rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.days.iter().flat_map(|day| {
            day.exercises
                .iter()
                .map(move |exercise| (day.day.as_str(), exercise.as_str()))
        })
    }

    /// Nutrition text split on line breaks; blank lines are kept
    ///
    /// Returns nothing when the plan is empty.
    pub fn nutrition_lines(&self) -> impl Iterator<Item = &str> {
        let plan = self.nutrition_plan.as_str();
        plan.split('\n')
            .filter(move |_| !plan.is_empty())
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

impl From<GeneratedRoutine> for NormalizedRoutine {
    fn from(routine: GeneratedRoutine) -> Self {
        normalize(routine)
    }
}

/// Convert a raw routine into the total record the renderer expects
///
/// Plain text becomes the nutrition plan under the default title. Records
/// pass through with defaults: a missing or blank title becomes the default
/// title, every other missing field becomes empty.
#[must_use]
pub fn normalize(routine: GeneratedRoutine) -> NormalizedRoutine {
    match routine {
        GeneratedRoutine::Text(text) => NormalizedRoutine {
            title: DEFAULT_TITLE.to_owned(),
            days: Vec::new(),
            exercises: Vec::new(),
            nutrition_plan: text,
        },
        GeneratedRoutine::Record(record) => NormalizedRoutine {
            title: record
                .title
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            days: record.days,
            exercises: record.exercises,
            nutrition_plan: record.nutrition_plan.unwrap_or_default(),
        },
    }
}

/// Serde adapter keeping the JSON object order of the day mapping
mod ordered_days {
    use std::fmt::{Formatter, Result as FmtResult};

    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    use super::TrainingDay;

    pub fn serialize<S>(days: &[TrainingDay], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(days.iter().map(|day| (&day.day, &day.exercises)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<TrainingDay>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DaysVisitor)
    }

    struct DaysVisitor;

    impl<'de> Visitor<'de> for DaysVisitor {
        type Value = Vec<TrainingDay>;

        fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
            formatter.write_str("a map from day label to a list of exercise names")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut days: Vec<TrainingDay> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((day, exercises)) =
                map.next_entry::<String, Option<Vec<String>>>()?
            {
                let exercises = exercises.unwrap_or_default();
                // A repeated label keeps its first position and its last value
                if let Some(existing) = days.iter_mut().find(|d| d.day == day) {
                    existing.exercises = exercises;
                } else {
                    days.push(TrainingDay { day, exercises });
                }
            }
            Ok(days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_prescription_keeps_fraction_marker() {
        assert_eq!(Prescription::Decimal(3.0).to_string(), "3.0");
        assert_eq!(Prescription::Decimal(2.5).to_string(), "2.5");
        assert_eq!(Prescription::from("8-12").to_string(), "8-12");
    }

    #[test]
    fn test_summary_line_with_missing_fields() {
        let detail = ExerciseDetail {
            name: Some("Plank".to_owned()),
            ..ExerciseDetail::default()
        };
        assert_eq!(detail.summary_line(), "Plank:  series de  repeticiones");
    }

    #[test]
    fn test_repeated_day_label_keeps_first_position() {
        let json = r#"{"days":{"Mon":["A"],"Tue":["B"],"Mon":["C"]}}"#;
        let record: RoutineRecord = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(
            record.days,
            vec![
                TrainingDay::new("Mon", vec!["C".to_owned()]),
                TrainingDay::new("Tue", vec!["B".to_owned()]),
            ]
        );
    }

    #[test]
    fn test_nutrition_lines_strip_carriage_returns() {
        let routine = normalize(GeneratedRoutine::Text("a\r\n\r\nb".to_owned()));
        assert_eq!(routine.nutrition_lines().collect::<Vec<_>>(), vec!["a", "", "b"]);
    }
}
