// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod assignment;
pub mod dashboard;
pub mod profile;
pub mod strength;

pub use activity::{
    ActivitySample, ExerciseLog, LoadKind, SessionStatus, SetEntry, SetType, WorkoutSession,
};
pub use assignment::WorkoutAssignment;
pub use dashboard::{
    ActivityAnalysis, DailyFrequencyPoint, DashboardReport, FrequencyGraph, TimeOfDay,
};
pub use profile::{ActivityLevel, CarbPreference, Goal, NutritionPlan, Sex, UserProfile};
pub use strength::{
    MuscleGroupStandard, RepMaxReport, StrengthRecord, StrengthStandards, StrengthTier,
};
