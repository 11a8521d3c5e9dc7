// ABOUTME: Core data models for routine requests and generated routines
// ABOUTME: Re-exports UserProfile, GeneratedRoutine, NormalizedRoutine and their parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `UserProfile`: the attributes collected by the form, one per request
//! - `GeneratedRoutine`: raw model output, prose or a partial record
//! - `NormalizedRoutine`: the fully defaulted record the PDF renderer consumes

/// User profile and its enumerations
pub mod profile;
/// Generated and normalized routines
pub mod routine;

pub use profile::{Diet, Experience, Goal, Sex, UserProfile};
pub use routine::{
    normalize, ExerciseDetail, GeneratedRoutine, NormalizedRoutine, Prescription, RoutineRecord,
    TrainingDay,
};
