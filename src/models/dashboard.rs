// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Dashboard report models. Derived per request, never stored.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Fixed time-of-day bands, in local hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum TimeOfDay {
    /// [5, 12)
    Morning,
    /// [12, 17)
    Afternoon,
    /// [17, 22)
    Evening,
    Night,
}

impl TimeOfDay {
    /// Scan order used for deterministic arg-max tie-breaks.
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

/// One day of the frequency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct DailyFrequencyPoint {
    /// Calendar date ("YYYY-MM-DD")
    pub label: String,
    pub count: u32,
}

/// Trailing-window frequency series plus its moving-average trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct FrequencyGraph {
    /// Oldest first
    pub points: Vec<DailyFrequencyPoint>,
    /// Same length as `points`
    pub trend: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct ActivityAnalysis {
    /// Weekday name, e.g. "Monday"; `None` without activity
    pub most_active_day: Option<String>,
    pub most_active_time: Option<TimeOfDay>,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_workouts: u32,
    pub total_exercise_logs: u32,
    pub total_volume: f64,
    pub weekly_average: f64,
    pub average_workout_duration_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardReport {
    pub frequency_graph: FrequencyGraph,
    pub analysis: ActivityAnalysis,
}
