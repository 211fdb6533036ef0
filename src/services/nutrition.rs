// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily nutrition targets from a stored profile.

use crate::db::ProfileRepository;
use crate::error::{AppError, Result};
use crate::formulas::nutrition_plan;
use crate::models::NutritionPlan;
use std::sync::Arc;

#[derive(Clone)]
pub struct NutritionService {
    profiles: Arc<dyn ProfileRepository>,
}

impl NutritionService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn get_nutrition_plan(&self, owner_id: &str) -> Result<NutritionPlan> {
        let profile = self
            .profiles
            .get_profile(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", owner_id)))?;

        nutrition_plan(&profile)
    }
}
