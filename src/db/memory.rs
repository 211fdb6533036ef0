// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory repositories for local development and tests.

use crate::db::{ActivityRepository, AssignmentRepository, ProfileRepository};
use crate::error::AppError;
use crate::models::{ExerciseLog, UserProfile, WorkoutAssignment, WorkoutSession};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// Process-local store. Clones share the same maps.
#[derive(Clone, Default)]
pub struct InMemoryDb {
    assignments: Arc<DashMap<String, WorkoutAssignment>>,
    sessions: Arc<DashMap<String, WorkoutSession>>,
    logs: Arc<DashMap<String, ExerciseLog>>,
    profiles: Arc<DashMap<String, UserProfile>>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_session(&self, session: WorkoutSession) {
        self.sessions.insert(session.id.clone(), session);
    }

    pub fn insert_log(&self, log: ExerciseLog) {
        self.logs.insert(log.id.clone(), log);
    }

    pub fn insert_profile(&self, profile: UserProfile) {
        self.profiles.insert(profile.owner_id.clone(), profile);
    }

    /// Every assignment held for `owner_id`, ordered by workout id.
    pub fn assignments_for(&self, owner_id: &str) -> Vec<WorkoutAssignment> {
        let mut found: Vec<WorkoutAssignment> = self
            .assignments
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| a.workout_id.cmp(&b.workout_id));
        found
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryDb {
    async fn find_by_owner_and_references(
        &self,
        owner_id: &str,
        workout_ids: &[String],
    ) -> Result<Vec<WorkoutAssignment>, AppError> {
        Ok(workout_ids
            .iter()
            .filter_map(|workout_id| {
                self.assignments
                    .get(&crate::models::assignment::document_id(owner_id, workout_id))
                    .map(|entry| entry.value().clone())
            })
            .filter(|a| a.owner_id == owner_id)
            .collect())
    }

    async fn upsert(&self, record: &WorkoutAssignment) -> Result<WorkoutAssignment, AppError> {
        self.assignments.insert(record.document_id(), record.clone());
        Ok(record.clone())
    }
}

#[async_trait]
impl ActivityRepository for InMemoryDb {
    async fn find_sessions(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>, AppError> {
        let mut found: Vec<WorkoutSession> = self
            .sessions
            .iter()
            .filter(|s| s.owner_id == owner_id && s.start_time >= start && s.start_time <= end)
            .map(|s| s.value().clone())
            .collect();
        found.sort_by_key(|s| s.start_time);
        Ok(found)
    }

    async fn find_logs(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExerciseLog>, AppError> {
        let mut found: Vec<ExerciseLog> = self
            .logs
            .iter()
            .filter(|l| l.owner_id == owner_id && l.performed_at >= start && l.performed_at <= end)
            .map(|l| l.value().clone())
            .collect();
        found.sort_by_key(|l| l.performed_at);
        Ok(found)
    }

    async fn find_logs_for_exercise(
        &self,
        owner_id: &str,
        exercise_id: &str,
    ) -> Result<Vec<ExerciseLog>, AppError> {
        let mut found: Vec<ExerciseLog> = self
            .logs
            .iter()
            .filter(|l| l.owner_id == owner_id && l.exercise_id == exercise_id)
            .map(|l| l.value().clone())
            .collect();
        found.sort_by_key(|l| l.performed_at);
        Ok(found)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryDb {
    async fn get_profile(&self, owner_id: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.get(owner_id).map(|p| p.value().clone()))
    }
}
