// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-plan date scheduler.
//!
//! Handles the core workflow:
//! 1. Validate the request (no record is touched on bad input)
//! 2. Enumerate `7 × weeks` calendar days starting today
//! 3. Bind each day to a workout (by weekday, or by cyclic rotation)
//! 4. Load existing assignments for the referenced workouts
//! 5. Prune elapsed dates, union in the new ones, and upsert each record
//!
//! Upserts run one record at a time. A storage failure stops the loop but
//! does not roll back records already written.

use crate::db::AssignmentRepository;
use crate::error::{AppError, Result};
use crate::models::WorkoutAssignment;
use crate::time_utils::{local_date, Clock};
use chrono::{Datelike, Days, FixedOffset, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

pub const DAYS_PER_WEEK: usize = 7;

/// Longest plan accepted in one request (ten years).
pub const MAX_WEEKS: i64 = 520;

/// Schedules recurring workouts onto calendar dates.
#[derive(Clone)]
pub struct WorkoutScheduler {
    assignments: Arc<dyn AssignmentRepository>,
    clock: Arc<dyn Clock>,
    timezone: FixedOffset,
}

impl WorkoutScheduler {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        clock: Arc<dyn Clock>,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            assignments,
            clock,
            timezone,
        }
    }

    /// Schedule one workout per weekday, Monday first, for `weeks` weeks.
    pub async fn schedule_by_weekday(
        &self,
        owner_id: &str,
        weekly: &[String],
        weeks: i64,
    ) -> Result<Vec<WorkoutAssignment>> {
        let weeks = validate_weeks(weeks)?;
        if weekly.len() != DAYS_PER_WEEK {
            return Err(AppError::invalid(format!(
                "weekly plan needs exactly {} workouts (Monday..Sunday), got {}",
                DAYS_PER_WEEK,
                weekly.len()
            )));
        }
        validate_references(weekly)?;

        let today = self.today();
        let batch = plan_weekly(weekly, today, weeks)?;
        tracing::info!(owner_id, weeks, %today, mode = "weekly", "Scheduling workouts");
        self.merge_batch(owner_id, batch, today).await
    }

    /// Rotate through `rotation` one day at a time for `weeks` weeks.
    pub async fn schedule_cyclic(
        &self,
        owner_id: &str,
        rotation: &[String],
        weeks: i64,
    ) -> Result<Vec<WorkoutAssignment>> {
        let weeks = validate_weeks(weeks)?;
        if rotation.is_empty() {
            return Err(AppError::invalid("cyclic plan needs at least one workout"));
        }
        validate_references(rotation)?;

        let today = self.today();
        let batch = plan_cyclic(rotation, today, weeks)?;
        tracing::info!(
            owner_id,
            weeks,
            %today,
            rotation_len = rotation.len(),
            mode = "cyclic",
            "Scheduling workouts"
        );
        self.merge_batch(owner_id, batch, today).await
    }

    fn today(&self) -> NaiveDate {
        local_date(self.clock.now(), &self.timezone)
    }

    /// Merge a freshly enumerated batch into stored assignments.
    async fn merge_batch(
        &self,
        owner_id: &str,
        batch: BTreeMap<String, BTreeSet<NaiveDate>>,
        today: NaiveDate,
    ) -> Result<Vec<WorkoutAssignment>> {
        let workout_ids: Vec<String> = batch.keys().cloned().collect();
        let mut existing: BTreeMap<String, WorkoutAssignment> = self
            .assignments
            .find_by_owner_and_references(owner_id, &workout_ids)
            .await?
            .into_iter()
            .map(|a| (a.workout_id.clone(), a))
            .collect();

        let now = self.clock.now();
        let mut touched = Vec::with_capacity(batch.len());

        for (workout_id, dates) in batch {
            let record = match existing.remove(&workout_id) {
                Some(mut record) => {
                    let pruned = record.prune_elapsed(today);
                    let added = record.merge_dates(dates, now);
                    tracing::debug!(
                        owner_id,
                        workout_id = %workout_id,
                        pruned,
                        added,
                        "Updating assignment"
                    );
                    record
                }
                None => {
                    tracing::debug!(
                        owner_id,
                        workout_id = %workout_id,
                        dates = dates.len(),
                        "Creating assignment"
                    );
                    WorkoutAssignment::new(owner_id, &workout_id, dates, now)
                }
            };

            let stored = self.assignments.upsert(&record).await.map_err(|e| {
                tracing::warn!(
                    owner_id,
                    workout_id = %workout_id,
                    written = touched.len(),
                    "Aborting schedule after storage failure"
                );
                e
            })?;
            touched.push(stored);
        }

        tracing::info!(owner_id, assignments = touched.len(), "Schedule merged");
        Ok(touched)
    }
}

fn validate_weeks(weeks: i64) -> Result<usize> {
    if !(1..=MAX_WEEKS).contains(&weeks) {
        return Err(AppError::invalid(format!(
            "weeks must be between 1 and {}, got {}",
            MAX_WEEKS, weeks
        )));
    }
    usize::try_from(weeks).map_err(|_| AppError::invalid("weeks is too large"))
}

fn validate_references(workout_ids: &[String]) -> Result<()> {
    if workout_ids.iter().any(|w| w.trim().is_empty()) {
        return Err(AppError::invalid("workout references must not be empty"));
    }
    Ok(())
}

/// The `7 × weeks` consecutive days starting at `today`.
fn enumerate_days(today: NaiveDate, weeks: usize) -> Result<Vec<NaiveDate>> {
    let count = DAYS_PER_WEEK
        .checked_mul(weeks)
        .ok_or_else(|| AppError::invalid("weeks is too large"))?;
    (0..count as u64)
        .map(|offset| {
            today
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| AppError::invalid("schedule runs past the supported calendar"))
        })
        .collect()
}

/// Weekday mode: day `d` gets `weekly[d.weekday().num_days_from_monday()]`.
pub fn plan_weekly(
    weekly: &[String],
    today: NaiveDate,
    weeks: usize,
) -> Result<BTreeMap<String, BTreeSet<NaiveDate>>> {
    let mut batch: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
    for day in enumerate_days(today, weeks)? {
        let workout = weekly
            .get(day.weekday().num_days_from_monday() as usize)
            .ok_or_else(|| AppError::invalid("weekly plan is missing a weekday"))?;
        batch.entry(workout.clone()).or_default().insert(day);
    }
    Ok(batch)
}

/// Cyclic mode: the `i`-th enumerated day gets `rotation[i % rotation.len()]`.
pub fn plan_cyclic(
    rotation: &[String],
    today: NaiveDate,
    weeks: usize,
) -> Result<BTreeMap<String, BTreeSet<NaiveDate>>> {
    if rotation.is_empty() {
        return Err(AppError::invalid("cyclic plan needs at least one workout"));
    }
    let mut batch: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
    for (i, day) in enumerate_days(today, weeks)?.into_iter().enumerate() {
        let workout = &rotation[i % rotation.len()];
        batch.entry(workout.clone()).or_default().insert(day);
    }
    Ok(batch)
}
