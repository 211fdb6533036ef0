// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout assignment model: one workout recurring on a set of calendar days.

use crate::time_utils::rfc3339_secs;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stored assignment record in Firestore.
///
/// At most one record exists per (owner, workout). The date set is ordered
/// and never holds the same calendar day twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAssignment {
    /// Owner (user id)
    pub owner_id: String,
    /// Workout reference
    pub workout_id: String,
    /// Calendar days the workout is scheduled on ("YYYY-MM-DD")
    #[serde(default)]
    pub dates: BTreeSet<NaiveDate>,
    #[serde(with = "rfc3339_secs")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "rfc3339_secs")]
    pub updated_at: DateTime<Utc>,
}

impl WorkoutAssignment {
    pub fn new(
        owner_id: &str,
        workout_id: &str,
        dates: BTreeSet<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            workout_id: workout_id.to_string(),
            dates,
            created_at: now,
            updated_at: now,
        }
    }

    /// Firestore document id for this record.
    pub fn document_id(&self) -> String {
        document_id(&self.owner_id, &self.workout_id)
    }

    /// Drop every date strictly before `today`. Returns how many were dropped.
    ///
    /// Elapsed dates are never restored by a later merge.
    pub fn prune_elapsed(&mut self, today: NaiveDate) -> usize {
        let before = self.dates.len();
        self.dates = self.dates.split_off(&today);
        before - self.dates.len()
    }

    /// Union `new_dates` into the record. Returns how many days were new.
    pub fn merge_dates<I>(&mut self, new_dates: I, now: DateTime<Utc>) -> usize
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let before = self.dates.len();
        self.dates.extend(new_dates);
        self.updated_at = now;
        self.dates.len() - before
    }
}

/// Document id: owner and workout, both URL-encoded, joined by `:`.
///
/// `encode` always escapes `:` and `/`, so the separator can only come from
/// here and distinct pairs never share an id.
pub fn document_id(owner_id: &str, workout_id: &str) -> String {
    format!(
        "{}:{}",
        urlencoding::encode(owner_id),
        urlencoding::encode(workout_id)
    )
}
