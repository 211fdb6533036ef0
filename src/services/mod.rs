// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod dashboard;
pub mod nutrition;
pub mod scheduler;
pub mod strength;

pub use dashboard::DashboardService;
pub use nutrition::NutritionService;
pub use scheduler::WorkoutScheduler;
pub use strength::StrengthService;
