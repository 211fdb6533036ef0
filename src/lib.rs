// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Liftlog-Tracker: workout scheduling and training analytics
//!
//! This crate provides the backend for scheduling recurring workouts onto
//! calendar dates and for deriving frequency, streak, rep-max, and strength
//! statistics from logged training history.

pub mod config;
pub mod db;
pub mod error;
pub mod formulas;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{ActivityRepository, AssignmentRepository, ProfileRepository};
use services::{DashboardService, NutritionService, StrengthService, WorkoutScheduler};
use std::sync::Arc;
use time_utils::Clock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub scheduler: WorkoutScheduler,
    pub dashboard: DashboardService,
    pub strength: StrengthService,
    pub nutrition: NutritionService,
}

impl AppState {
    /// Wire every service onto the given repositories and clock.
    pub fn new<R>(config: Config, repo: Arc<R>, clock: Arc<dyn Clock>) -> Self
    where
        R: AssignmentRepository + ActivityRepository + ProfileRepository + 'static,
    {
        let timezone = config.timezone;
        Self {
            scheduler: WorkoutScheduler::new(repo.clone(), clock.clone(), timezone),
            dashboard: DashboardService::new(repo.clone(), clock.clone(), timezone),
            strength: StrengthService::new(repo.clone(), repo.clone(), clock),
            nutrition: NutritionService::new(repo),
            config,
        }
    }
}
