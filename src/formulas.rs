// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pure numeric formulas: rep-max estimation, strength tiers, and nutrition.
//!
//! Rep maxes use the Brzycki relation `1RM = w / (1.0278 - 0.0278 × reps)`,
//! which degenerates at 37 reps; anything past [`MAX_REPS`] is rejected
//! rather than clamped.
//!
//! Nutrition uses the Mifflin-St Jeor BMR equation with fixed activity
//! multipliers, goal adjustments, and macro ratios. Every constant lives in
//! a lookup keyed by the relevant enum.

use crate::error::{AppError, Result};
use crate::models::{
    ActivityLevel, CarbPreference, Goal, NutritionPlan, Sex, StrengthTier, UserProfile,
};

/// Highest rep count the Brzycki relation is defined for.
pub const MAX_REPS: u32 = 36;

const BRZYCKI_INTERCEPT: f64 = 1.0278;
const BRZYCKI_SLOPE: f64 = 0.0278;

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn validate_reps(reps: u32) -> Result<()> {
    if reps == 0 || reps > MAX_REPS {
        return Err(AppError::invalid(format!(
            "reps must be between 1 and {}, got {}",
            MAX_REPS, reps
        )));
    }
    Ok(())
}

fn validate_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::invalid(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn brzycki_factor(reps: u32) -> f64 {
    BRZYCKI_INTERCEPT - BRZYCKI_SLOPE * reps as f64
}

// ─── Rep Max ─────────────────────────────────────────────────

/// Estimated one-rep max for `weight` lifted `reps` times, rounded to 2 dp.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> Result<f64> {
    validate_positive("weight", weight)?;
    validate_reps(reps)?;
    Ok(round_to(weight / brzycki_factor(reps), 2))
}

/// Estimated one-rep max for an assisted movement, computed against the net
/// load `body_weight - assist_weight`.
pub fn estimate_assisted_one_rep_max(
    body_weight: f64,
    assist_weight: f64,
    reps: u32,
) -> Result<f64> {
    validate_positive("body weight", body_weight)?;
    if !assist_weight.is_finite() || assist_weight < 0.0 || assist_weight >= body_weight {
        return Err(AppError::invalid(format!(
            "assist weight must be in [0, {}), got {}",
            body_weight, assist_weight
        )));
    }
    estimate_one_rep_max(body_weight - assist_weight, reps)
}

/// Weight liftable for `target_reps` given a one-rep max (inverse Brzycki).
pub fn estimate_rep_max_at_target(one_rep_max: f64, target_reps: u32) -> Result<f64> {
    validate_positive("one-rep max", one_rep_max)?;
    validate_reps(target_reps)?;
    Ok(round_to(one_rep_max * brzycki_factor(target_reps), 2))
}

// ─── Strength Tiers ──────────────────────────────────────────

/// Tier whose lower bound is the greatest bound not above `score`.
///
/// A score exactly on a threshold belongs to the higher tier. Negative and
/// NaN scores fall into the lowest tier.
pub fn classify_strength(score: f64) -> StrengthTier {
    StrengthTier::ALL
        .iter()
        .rev()
        .copied()
        .find(|tier| score >= tier.min_score())
        .unwrap_or(StrengthTier::Beginner)
}

/// Score used for tiering: relative strength × 100, rounded to 2 dp.
pub fn strength_score(relative_strength: f64) -> f64 {
    round_to(relative_strength * 100.0, 2)
}

// ─── Nutrition ───────────────────────────────────────────────

const fn sex_offset(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    }
}

const fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

const fn goal_adjustment(goal: Goal) -> f64 {
    match goal {
        Goal::Lose => -500.0,
        Goal::Maintain => 0.0,
        Goal::Gain => 300.0,
    }
}

/// Share of daily calories per macronutrient. Each row sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatio {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

const fn ratio(protein: f64, carbs: f64, fat: f64) -> MacroRatio {
    MacroRatio { protein, carbs, fat }
}

pub const fn macro_ratio(goal: Goal, carbs: CarbPreference) -> MacroRatio {
    match (goal, carbs) {
        (Goal::Lose, CarbPreference::Low) => ratio(0.40, 0.20, 0.40),
        (Goal::Lose, CarbPreference::Moderate) => ratio(0.35, 0.40, 0.25),
        (Goal::Lose, CarbPreference::High) => ratio(0.30, 0.50, 0.20),
        (Goal::Maintain, CarbPreference::Low) => ratio(0.35, 0.25, 0.40),
        (Goal::Maintain, CarbPreference::Moderate) => ratio(0.30, 0.40, 0.30),
        (Goal::Maintain, CarbPreference::High) => ratio(0.25, 0.55, 0.20),
        (Goal::Gain, CarbPreference::Low) => ratio(0.35, 0.30, 0.35),
        (Goal::Gain, CarbPreference::Moderate) => ratio(0.30, 0.45, 0.25),
        (Goal::Gain, CarbPreference::High) => ratio(0.25, 0.55, 0.20),
    }
}

/// Macro grams for a daily calorie target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Basal metabolic rate (Mifflin-St Jeor), whole kcal.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> Result<f64> {
    validate_positive("weight", weight_kg)?;
    validate_positive("height", height_cm)?;
    if age == 0 {
        return Err(AppError::invalid("age must be positive"));
    }
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + sex_offset(sex);
    Ok(bmr.round())
}

/// Body mass index, 1 dp.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    validate_positive("weight", weight_kg)?;
    validate_positive("height", height_cm)?;
    let height_m = height_cm / 100.0;
    Ok(round_to(weight_kg / (height_m * height_m), 1))
}

/// Daily calorie target: BMR × activity multiplier + goal adjustment, whole kcal.
pub fn calories_per_day(bmr: f64, level: ActivityLevel, goal: Goal) -> f64 {
    (bmr * activity_multiplier(level) + goal_adjustment(goal)).round()
}

/// Split a calorie target into whole grams of protein, carbs, and fat.
pub fn macronutrient_split(calories: f64, goal: Goal, carbs: CarbPreference) -> MacroSplit {
    let r = macro_ratio(goal, carbs);
    MacroSplit {
        protein_g: (calories * r.protein / KCAL_PER_GRAM_PROTEIN).round(),
        carbs_g: (calories * r.carbs / KCAL_PER_GRAM_CARBS).round(),
        fat_g: (calories * r.fat / KCAL_PER_GRAM_FAT).round(),
    }
}

/// Full nutrition plan for a stored profile.
pub fn nutrition_plan(profile: &UserProfile) -> Result<NutritionPlan> {
    let bmr = calculate_bmr(profile.body_weight_kg, profile.height_cm, profile.age, profile.sex)?;
    let bmi = calculate_bmi(profile.body_weight_kg, profile.height_cm)?;
    let calories = calories_per_day(bmr, profile.activity_level, profile.goal);
    let split = macronutrient_split(calories, profile.goal, profile.carb_preference);

    Ok(NutritionPlan {
        bmr,
        bmi,
        calories_per_day: calories,
        protein_g: split.protein_g,
        carbs_g: split.carbs_g,
        fat_g: split.fat_g,
    })
}
