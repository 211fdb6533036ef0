//! Database layer: repository traits plus Firestore and in-memory backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::InMemoryDb;

use crate::error::AppError;
use crate::models::{ExerciseLog, UserProfile, WorkoutAssignment, WorkoutSession};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Collection names as constants.
pub mod collections {
    pub const WORKOUT_ASSIGNMENTS: &str = "workout_assignments";
    pub const WORKOUT_SESSIONS: &str = "workout_sessions";
    pub const EXERCISE_LOGS: &str = "exercise_logs";
    /// Body metrics (keyed by owner id)
    pub const USER_PROFILES: &str = "user_profiles";
}

/// Storage for workout assignments.
///
/// `upsert` replaces the whole record by primary key (owner, workout). Writes
/// of different records are independent: there is no cross-record transaction.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn find_by_owner_and_references(
        &self,
        owner_id: &str,
        workout_ids: &[String],
    ) -> Result<Vec<WorkoutAssignment>, AppError>;

    async fn upsert(&self, record: &WorkoutAssignment) -> Result<WorkoutAssignment, AppError>;
}

/// Read-only access to activity history. Bounds are inclusive.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn find_sessions(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>, AppError>;

    async fn find_logs(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExerciseLog>, AppError>;

    /// All logs for one exercise, oldest first.
    async fn find_logs_for_exercise(
        &self,
        owner_id: &str,
        exercise_id: &str,
    ) -> Result<Vec<ExerciseLog>, AppError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get_profile(&self, owner_id: &str) -> Result<Option<UserProfile>, AppError>;
}
