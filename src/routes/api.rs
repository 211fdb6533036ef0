// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes. All user-scoped routes take the owner id as a path segment.

use crate::error::{AppError, Result};
use crate::formulas::{
    estimate_assisted_one_rep_max, estimate_one_rep_max, estimate_rep_max_at_target,
};
use crate::models::{
    DashboardReport, NutritionPlan, RepMaxReport, StrengthStandards, WorkoutAssignment,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{owner}/schedule/weekly", post(schedule_weekly))
        .route("/api/users/{owner}/schedule/cyclic", post(schedule_cyclic))
        .route("/api/users/{owner}/dashboard", get(get_dashboard))
        .route(
            "/api/users/{owner}/exercises/{exercise}/rep-max",
            get(get_rep_max),
        )
        .route(
            "/api/users/{owner}/strength-standards",
            get(get_strength_standards),
        )
        .route("/api/users/{owner}/nutrition", get(get_nutrition))
        .route("/api/calculators/one-rep-max", get(one_rep_max_calculator))
}

// ─── Scheduling ──────────────────────────────────────────────

/// One workout per weekday, Monday first.
#[derive(Deserialize, Validate)]
pub struct WeeklyScheduleRequest {
    #[validate(length(equal = 7))]
    pub workouts: Vec<String>,
    #[validate(range(min = 1))]
    pub weeks: i64,
}

/// Workouts rotated one per day.
#[derive(Deserialize, Validate)]
pub struct CyclicScheduleRequest {
    #[validate(length(min = 1))]
    pub workouts: Vec<String>,
    #[validate(range(min = 1))]
    pub weeks: i64,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AssignmentSummary {
    pub workout_id: String,
    /// Scheduled days ("YYYY-MM-DD"), ascending
    pub dates: Vec<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScheduleResponse {
    pub assignments: Vec<AssignmentSummary>,
}

impl From<Vec<WorkoutAssignment>> for ScheduleResponse {
    fn from(assignments: Vec<WorkoutAssignment>) -> Self {
        Self {
            assignments: assignments
                .into_iter()
                .map(|a| AssignmentSummary {
                    workout_id: a.workout_id,
                    dates: a.dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
                })
                .collect(),
        }
    }
}

async fn schedule_weekly(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
    Json(body): Json<WeeklyScheduleRequest>,
) -> Result<Json<ScheduleResponse>> {
    body.validate()?;
    let assignments = state
        .scheduler
        .schedule_by_weekday(&owner, &body.workouts, body.weeks)
        .await?;
    Ok(Json(assignments.into()))
}

async fn schedule_cyclic(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
    Json(body): Json<CyclicScheduleRequest>,
) -> Result<Json<ScheduleResponse>> {
    body.validate()?;
    let assignments = state
        .scheduler
        .schedule_cyclic(&owner, &body.workouts, body.weeks)
        .await?;
    Ok(Json(assignments.into()))
}

// ─── Analytics ───────────────────────────────────────────────

#[derive(Deserialize)]
struct DashboardQuery {
    /// First day of the range (YYYY-MM-DD)
    start: Option<String>,
    /// Last day of the range (YYYY-MM-DD)
    end: Option<String>,
}

fn parse_date(name: &str, raw: Option<&str>) -> Result<NaiveDate> {
    let raw = raw.ok_or_else(|| AppError::invalid(format!("Missing '{}' parameter", name)))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::invalid(format!(
            "Invalid '{}' parameter: must be a YYYY-MM-DD date",
            name
        ))
    })
}

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardReport>> {
    let start = parse_date("start", params.start.as_deref())?;
    let end = parse_date("end", params.end.as_deref())?;

    tracing::debug!(owner_id = %owner, %start, %end, "Fetching dashboard");

    Ok(Json(state.dashboard.get_dashboard(&owner, start, end).await?))
}

#[derive(Deserialize)]
struct RepMaxQuery {
    /// Use only the most recent log
    #[serde(default)]
    latest: bool,
}

async fn get_rep_max(
    State(state): State<Arc<AppState>>,
    Path((owner, exercise)): Path<(String, String)>,
    Query(params): Query<RepMaxQuery>,
) -> Result<Json<RepMaxReport>> {
    Ok(Json(
        state
            .strength
            .get_rep_max(&owner, &exercise, params.latest)
            .await?,
    ))
}

async fn get_strength_standards(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
) -> Result<Json<StrengthStandards>> {
    Ok(Json(state.strength.get_strength_standards(&owner).await?))
}

async fn get_nutrition(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
) -> Result<Json<NutritionPlan>> {
    Ok(Json(state.nutrition.get_nutrition_plan(&owner).await?))
}

// ─── Calculators ─────────────────────────────────────────────

#[derive(Deserialize)]
struct OneRepMaxQuery {
    /// Lifted weight; ignored for assisted lifts
    weight: Option<f64>,
    reps: u32,
    /// Assistance weight; requires `body_weight`
    assist: Option<f64>,
    body_weight: Option<f64>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OneRepMaxResponse {
    pub one_rep_max: f64,
    pub eight_rep_max: f64,
    pub twelve_rep_max: f64,
}

/// Stateless 1RM calculator.
async fn one_rep_max_calculator(
    Query(params): Query<OneRepMaxQuery>,
) -> Result<Json<OneRepMaxResponse>> {
    let one_rep_max = match params.assist {
        Some(assist) => {
            let body_weight = params.body_weight.ok_or_else(|| {
                AppError::invalid("'body_weight' is required with 'assist'")
            })?;
            estimate_assisted_one_rep_max(body_weight, assist, params.reps)?
        }
        None => {
            let weight = params
                .weight
                .ok_or_else(|| AppError::invalid("Missing 'weight' parameter"))?;
            estimate_one_rep_max(weight, params.reps)?
        }
    };

    Ok(Json(OneRepMaxResponse {
        one_rep_max,
        eight_rep_max: estimate_rep_max_at_target(one_rep_max, 8)?,
        twelve_rep_max: estimate_rep_max_at_target(one_rep_max, 12)?,
    }))
}
