// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity history models: workout sessions and logged exercise entries.

use crate::time_utils::rfc3339_secs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a workout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
    Cancelled,
}

/// Stored workout session in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Session ID (also used as document ID)
    pub id: String,
    /// Owner (user id)
    pub owner_id: String,
    /// Workout this session was started from, if any
    #[serde(default)]
    pub workout_id: Option<String>,
    #[serde(with = "rfc3339_secs")]
    pub start_time: DateTime<Utc>,
    #[serde(default, with = "rfc3339_secs::option")]
    pub end_time: Option<DateTime<Utc>>,
    /// Sum of weight × reps across the session
    #[serde(default)]
    pub total_volume: f64,
    pub status: SessionStatus,
}

impl WorkoutSession {
    /// Duration in minutes, if the session has ended.
    pub fn duration_minutes(&self) -> Option<f64> {
        let end = self.end_time?;
        let seconds = (end - self.start_time).num_seconds();
        (seconds >= 0).then(|| seconds as f64 / 60.0)
    }
}

/// How a set is classified by the lifter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    #[default]
    Working,
    WarmUp,
    Drop,
    Failure,
    BackOff,
}

/// How the recorded set weight relates to the load actually moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadKind {
    /// Set weight is the load.
    #[default]
    Weighted,
    /// Load is bodyweight plus the set weight (e.g. weighted pull-ups).
    Bodyweight,
    /// Set weight is machine/band assistance subtracted from bodyweight.
    Assisted,
}

/// One performed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetEntry {
    pub weight: f64,
    pub reps: u32,
    #[serde(default)]
    pub set_type: SetType,
}

/// Stored exercise log in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Log ID (also used as document ID)
    pub id: String,
    /// Owner (user id)
    pub owner_id: String,
    /// Exercise reference
    pub exercise_id: String,
    /// Exercise display name
    pub exercise_name: String,
    /// Primary muscle group (denormalized from the exercise catalog)
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub load_kind: LoadKind,
    #[serde(with = "rfc3339_secs")]
    pub performed_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_sets: u32,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

impl ExerciseLog {
    /// Sets that count toward rep-max estimation.
    pub fn working_sets(&self) -> impl Iterator<Item = &SetEntry> {
        self.sets.iter().filter(|s| s.set_type == SetType::Working)
    }
}

/// A single dated unit of activity, as seen by the aggregator.
#[derive(Debug, Clone, Copy)]
pub enum ActivitySample<'a> {
    Session(&'a WorkoutSession),
    Log(&'a ExerciseLog),
}

impl ActivitySample<'_> {
    /// Instant the activity is bucketed by.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            ActivitySample::Session(s) => s.start_time,
            ActivitySample::Log(l) => l.performed_at,
        }
    }

    pub fn volume(&self) -> f64 {
        match self {
            ActivitySample::Session(s) => s.total_volume,
            ActivitySample::Log(l) => l.total_volume,
        }
    }
}
