// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Workout assignments (read-modify-write by the scheduler)
//! - Workout sessions and exercise logs (read-only analytics input)
//! - User profiles (read-only bodyweight and nutrition inputs)
//!
//! Sessions, logs, and profiles are written by other services sharing the
//! project; this client never writes them.

use crate::db::{collections, ActivityRepository, AssignmentRepository, ProfileRepository};
use crate::error::AppError;
use crate::models::assignment::document_id;
use crate::models::{ExerciseLog, UserProfile, WorkoutAssignment, WorkoutSession};
use crate::time_utils::format_utc_rfc3339;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Storage(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Storage("Database not connected (offline mode)".to_string()))
    }
}

// ─── Assignment Operations ───────────────────────────────────

#[async_trait]
impl AssignmentRepository for FirestoreDb {
    /// Point lookups by document id, run concurrently with a limit.
    async fn find_by_owner_and_references(
        &self,
        owner_id: &str,
        workout_ids: &[String],
    ) -> Result<Vec<WorkoutAssignment>, AppError> {
        let client = self.get_client()?;
        let doc_ids: Vec<String> = workout_ids
            .iter()
            .map(|w| document_id(owner_id, w))
            .collect();

        let found = stream::iter(doc_ids)
            .map(|doc_id| async move {
                client
                    .fluent()
                    .select()
                    .by_id_in(collections::WORKOUT_ASSIGNMENTS)
                    .obj::<WorkoutAssignment>()
                    .one(&doc_id)
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<WorkoutAssignment>, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Option<WorkoutAssignment>>, AppError>>()?;

        Ok(found
            .into_iter()
            .flatten()
            .filter(|a| a.owner_id == owner_id)
            .collect())
    }

    async fn upsert(&self, record: &WorkoutAssignment) -> Result<WorkoutAssignment, AppError> {
        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::WORKOUT_ASSIGNMENTS)
            .document_id(record.document_id())
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}

// ─── Activity Operations ─────────────────────────────────────

#[async_trait]
impl ActivityRepository for FirestoreDb {
    async fn find_sessions(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>, AppError> {
        let start = format_utc_rfc3339(start);
        let end = format_utc_rfc3339(end);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUT_SESSIONS)
            .filter(|q| {
                q.for_all([
                    q.field("owner_id").eq(owner_id),
                    q.field("start_time").greater_than_or_equal(start.as_str()),
                    q.field("start_time").less_than_or_equal(end.as_str()),
                ])
            })
            .order_by([("start_time", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }

    async fn find_logs(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExerciseLog>, AppError> {
        let start = format_utc_rfc3339(start);
        let end = format_utc_rfc3339(end);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::EXERCISE_LOGS)
            .filter(|q| {
                q.for_all([
                    q.field("owner_id").eq(owner_id),
                    q.field("performed_at").greater_than_or_equal(start.as_str()),
                    q.field("performed_at").less_than_or_equal(end.as_str()),
                ])
            })
            .order_by([("performed_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }

    async fn find_logs_for_exercise(
        &self,
        owner_id: &str,
        exercise_id: &str,
    ) -> Result<Vec<ExerciseLog>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::EXERCISE_LOGS)
            .filter(|q| {
                q.for_all([
                    q.field("owner_id").eq(owner_id),
                    q.field("exercise_id").eq(exercise_id),
                ])
            })
            .order_by([("performed_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}

// ─── Profile Operations ──────────────────────────────────────

#[async_trait]
impl ProfileRepository for FirestoreDb {
    async fn get_profile(&self, owner_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USER_PROFILES)
            .obj()
            .one(owner_id)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}
