// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftlog_tracker::config::Config;
use liftlog_tracker::db::{AssignmentRepository, FirestoreDb, InMemoryDb};
use liftlog_tracker::error::AppError;
use liftlog_tracker::models::{
    ActivityLevel, CarbPreference, ExerciseLog, Goal, LoadKind, SessionStatus, SetEntry, SetType,
    Sex, UserProfile, WorkoutAssignment, WorkoutSession,
};
use liftlog_tracker::routes::create_router;
use liftlog_tracker::time_utils::FixedClock;
use liftlog_tracker::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Owner id used by tests that don't care about isolation.
#[allow(dead_code)]
pub const OWNER: &str = "user-1";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Raw emulator client for seeding collections the service only reads.
#[allow(dead_code)]
pub async fn seed_client() -> firestore::FirestoreDb {
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

    firestore::FirestoreDb::with_options_token_source(
        firestore::FirestoreDbOptions::new("test-project".to_string()),
        gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
        gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
    )
    .await
    .expect("Failed to connect seed client to Firestore emulator")
}

/// Write `value` as document `id` in `collection`.
#[allow(dead_code)]
pub async fn seed<T>(client: &firestore::FirestoreDb, collection: &str, id: &str, value: &T)
where
    T: serde::Serialize + Sync + Send + for<'de> serde::Deserialize<'de>,
{
    let _: () = client
        .fluent()
        .update()
        .in_col(collection)
        .document_id(id)
        .object(value)
        .execute()
        .await
        .expect("Failed to seed document");
}

/// Parse an RFC3339 timestamp.
#[allow(dead_code)]
pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC3339")
        .with_timezone(&Utc)
}

/// Default test instant: Wednesday 2024-03-06 12:00 UTC.
#[allow(dead_code)]
pub fn test_now() -> DateTime<Utc> {
    parse_time("2024-03-06T12:00:00Z")
}

/// Create a test app over an in-memory store with the clock fixed at `test_now()`.
/// Returns the router, the shared state, and the store for seeding.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, InMemoryDb) {
    create_test_app_at(test_now())
}

/// Like `create_test_app`, with the clock fixed at `now`.
#[allow(dead_code)]
pub fn create_test_app_at(now: DateTime<Utc>) -> (axum::Router, Arc<AppState>, InMemoryDb) {
    create_test_app_with(InMemoryDb::new(), now)
}

/// Build an app over an existing store, so a later clock can see earlier writes.
#[allow(dead_code)]
pub fn create_test_app_with(
    db: InMemoryDb,
    now: DateTime<Utc>,
) -> (axum::Router, Arc<AppState>, InMemoryDb) {
    let state = Arc::new(AppState::new(
        Config::test_default(),
        Arc::new(db.clone()),
        Arc::new(FixedClock(now)),
    ));
    (create_router(state.clone()), state, db)
}

/// Assignment store that fails every upsert after the first `allowed`.
#[allow(dead_code)]
pub struct FlakyAssignments {
    pub inner: InMemoryDb,
    allowed: usize,
    attempts: AtomicUsize,
}

#[allow(dead_code)]
impl FlakyAssignments {
    pub fn new(inner: InMemoryDb, allowed: usize) -> Self {
        Self {
            inner,
            allowed,
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AssignmentRepository for FlakyAssignments {
    async fn find_by_owner_and_references(
        &self,
        owner_id: &str,
        workout_ids: &[String],
    ) -> Result<Vec<WorkoutAssignment>, AppError> {
        self.inner
            .find_by_owner_and_references(owner_id, workout_ids)
            .await
    }

    async fn upsert(&self, record: &WorkoutAssignment) -> Result<WorkoutAssignment, AppError> {
        if self.attempts.fetch_add(1, Ordering::SeqCst) >= self.allowed {
            return Err(AppError::Storage("simulated write failure".to_string()));
        }
        self.inner.upsert(record).await
    }
}

/// A completed session of `minutes` starting at `start`.
#[allow(dead_code)]
pub fn completed_session(id: &str, start: &str, minutes: i64, volume: f64) -> WorkoutSession {
    let start_time = parse_time(start);
    WorkoutSession {
        id: id.to_string(),
        owner_id: OWNER.to_string(),
        workout_id: Some("push".to_string()),
        start_time,
        end_time: Some(start_time + chrono::Duration::minutes(minutes)),
        total_volume: volume,
        status: SessionStatus::Completed,
    }
}

/// A session in a non-completed state.
#[allow(dead_code)]
pub fn session_with_status(id: &str, start: &str, status: SessionStatus) -> WorkoutSession {
    WorkoutSession {
        status,
        end_time: None,
        ..completed_session(id, start, 0, 500.0)
    }
}

#[allow(dead_code)]
pub fn working_set(weight: f64, reps: u32) -> SetEntry {
    SetEntry {
        weight,
        reps,
        set_type: SetType::Working,
    }
}

#[allow(dead_code)]
pub fn warm_up_set(weight: f64, reps: u32) -> SetEntry {
    SetEntry {
        weight,
        reps,
        set_type: SetType::WarmUp,
    }
}

/// An exercise log with the given sets; volume is summed from the sets.
#[allow(dead_code)]
pub fn exercise_log(
    id: &str,
    exercise_id: &str,
    muscle_group: &str,
    at: &str,
    sets: Vec<SetEntry>,
) -> ExerciseLog {
    ExerciseLog {
        id: id.to_string(),
        owner_id: OWNER.to_string(),
        exercise_id: exercise_id.to_string(),
        exercise_name: exercise_id.replace('_', " "),
        muscle_group: Some(muscle_group.to_string()),
        load_kind: LoadKind::Weighted,
        performed_at: parse_time(at),
        completed_sets: sets.len() as u32,
        total_volume: sets.iter().map(|s| s.weight * s.reps as f64).sum(),
        sets,
    }
}

/// 80 kg, 180 cm, 30-year-old male, moderately active, maintaining.
#[allow(dead_code)]
pub fn test_profile() -> UserProfile {
    UserProfile {
        owner_id: OWNER.to_string(),
        body_weight_kg: 80.0,
        height_cm: 180.0,
        age: 30,
        sex: Sex::Male,
        activity_level: ActivityLevel::Moderate,
        goal: Goal::Maintain,
        carb_preference: CarbPreference::Moderate,
    }
}
