// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strength tiers and the derived rep-max / standards reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Ordinal strength classification. Declaration order is tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Elite,
}

impl StrengthTier {
    /// All tiers, lowest first.
    pub const ALL: [StrengthTier; 5] = [
        StrengthTier::Beginner,
        StrengthTier::Novice,
        StrengthTier::Intermediate,
        StrengthTier::Advanced,
        StrengthTier::Elite,
    ];

    /// Inclusive lower score bound of the tier.
    pub const fn min_score(self) -> f64 {
        match self {
            StrengthTier::Beginner => 0.0,
            StrengthTier::Novice => 30.0,
            StrengthTier::Intermediate => 45.0,
            StrengthTier::Advanced => 75.0,
            StrengthTier::Elite => 112.5,
        }
    }
}

/// 1RM estimate and derived rep targets for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RepMaxReport {
    pub exercise_id: String,
    pub one_rep_max: f64,
    pub eight_rep_max: f64,
    pub twelve_rep_max: f64,
    /// When the set behind the estimate was performed
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_updated: DateTime<Utc>,
}

/// Per-exercise strength standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StrengthRecord {
    pub exercise_id: String,
    pub exercise_name: String,
    pub muscle_group: Option<String>,
    pub one_rep_max: f64,
    /// 1RM / bodyweight
    pub relative_strength: f64,
    pub score: f64,
    pub tier: StrengthTier,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_performed: DateTime<Utc>,
}

/// Aggregate standing for a muscle group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MuscleGroupStandard {
    pub muscle_group: String,
    pub exercise_count: u32,
    pub average_score: f64,
    pub tier: StrengthTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StrengthStandards {
    pub body_weight_kg: f64,
    pub per_exercise: Vec<StrengthRecord>,
    pub per_muscle_group: Vec<MuscleGroupStandard>,
}
