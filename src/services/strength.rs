// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rep-max estimation and strength standards from exercise logs.
//!
//! Only working sets count. Sets outside the estimator's domain (no load,
//! zero reps, more than 36 reps) are skipped rather than failing the report.

use crate::db::{ActivityRepository, ProfileRepository};
use crate::error::{AppError, Result};
use crate::formulas::{
    classify_strength, estimate_assisted_one_rep_max, estimate_one_rep_max,
    estimate_rep_max_at_target, round_to, strength_score,
};
use crate::models::{
    ExerciseLog, LoadKind, MuscleGroupStandard, RepMaxReport, SetEntry, StrengthRecord,
    StrengthStandards,
};
use crate::time_utils::Clock;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

const EIGHT_REPS: u32 = 8;
const TWELVE_REPS: u32 = 12;

/// Strength analytics over a user's exercise history.
#[derive(Clone)]
pub struct StrengthService {
    activities: Arc<dyn ActivityRepository>,
    profiles: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl StrengthService {
    pub fn new(
        activities: Arc<dyn ActivityRepository>,
        profiles: Arc<dyn ProfileRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            activities,
            profiles,
            clock,
        }
    }

    /// 1RM plus 8- and 12-rep targets for one exercise.
    ///
    /// With `use_latest`, only the most recent log's heaviest working set is
    /// used; otherwise the best estimate across all history wins.
    pub async fn get_rep_max(
        &self,
        owner_id: &str,
        exercise_id: &str,
        use_latest: bool,
    ) -> Result<RepMaxReport> {
        let logs = self
            .activities
            .find_logs_for_exercise(owner_id, exercise_id)
            .await?;
        if logs.is_empty() {
            return Err(AppError::NotFound(format!(
                "No logs for exercise {}",
                exercise_id
            )));
        }

        let body_weight = if logs.iter().any(|l| l.load_kind != LoadKind::Weighted) {
            self.body_weight(owner_id).await?
        } else {
            None
        };

        let best = if use_latest {
            logs.iter()
                .max_by_key(|l| l.performed_at)
                .and_then(|latest| latest_estimate(latest, body_weight))
        } else {
            best_estimate(&logs, body_weight)
        };

        let (one_rep_max, performed_at) = best.ok_or_else(|| {
            AppError::NotFound(format!(
                "No qualifying working sets for exercise {}",
                exercise_id
            ))
        })?;

        tracing::debug!(owner_id, exercise_id, use_latest, one_rep_max, "Estimated rep max");

        Ok(RepMaxReport {
            exercise_id: exercise_id.to_string(),
            one_rep_max,
            eight_rep_max: estimate_rep_max_at_target(one_rep_max, EIGHT_REPS)?,
            twelve_rep_max: estimate_rep_max_at_target(one_rep_max, TWELVE_REPS)?,
            last_updated: performed_at,
        })
    }

    /// Tiered standing for every logged exercise and every muscle group.
    pub async fn get_strength_standards(&self, owner_id: &str) -> Result<StrengthStandards> {
        let body_weight = self
            .body_weight(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", owner_id)))?;

        let logs = self
            .activities
            .find_logs(owner_id, DateTime::UNIX_EPOCH, self.clock.now())
            .await?;

        let mut by_exercise: BTreeMap<&str, Vec<&ExerciseLog>> = BTreeMap::new();
        for log in &logs {
            by_exercise.entry(log.exercise_id.as_str()).or_default().push(log);
        }

        let mut per_exercise = Vec::with_capacity(by_exercise.len());
        for (exercise_id, history) in by_exercise {
            let Some((one_rep_max, _)) = best_estimate(history.iter().copied(), Some(body_weight))
            else {
                continue;
            };
            // Name and muscle group come from the most recent log
            let Some(latest) = history.iter().max_by_key(|l| l.performed_at) else {
                continue;
            };
            let relative = one_rep_max / body_weight;
            let score = strength_score(relative);
            per_exercise.push(StrengthRecord {
                exercise_id: exercise_id.to_string(),
                exercise_name: latest.exercise_name.clone(),
                muscle_group: latest.muscle_group.clone(),
                one_rep_max,
                relative_strength: round_to(relative, 2),
                score,
                tier: classify_strength(score),
                last_performed: latest.performed_at,
            });
        }

        let per_muscle_group = muscle_group_standards(&per_exercise);

        tracing::info!(
            owner_id,
            exercises = per_exercise.len(),
            muscle_groups = per_muscle_group.len(),
            "Computed strength standards"
        );

        Ok(StrengthStandards {
            body_weight_kg: body_weight,
            per_exercise,
            per_muscle_group,
        })
    }

    async fn body_weight(&self, owner_id: &str) -> Result<Option<f64>> {
        Ok(self
            .profiles
            .get_profile(owner_id)
            .await?
            .map(|p| p.body_weight_kg)
            .filter(|w| w.is_finite() && *w > 0.0))
    }
}

/// Net load moved in a set, if it can be determined.
fn effective_load(kind: LoadKind, set: &SetEntry, body_weight: Option<f64>) -> Option<f64> {
    match kind {
        LoadKind::Weighted => Some(set.weight),
        LoadKind::Bodyweight => body_weight.map(|bw| bw + set.weight),
        LoadKind::Assisted => body_weight.map(|bw| bw - set.weight),
    }
}

/// 1RM for one set, or `None` if the set is outside the estimator's domain.
fn set_one_rep_max(kind: LoadKind, set: &SetEntry, body_weight: Option<f64>) -> Option<f64> {
    match kind {
        LoadKind::Weighted => estimate_one_rep_max(set.weight, set.reps).ok(),
        LoadKind::Bodyweight => {
            estimate_one_rep_max(body_weight? + set.weight, set.reps).ok()
        }
        LoadKind::Assisted => {
            estimate_assisted_one_rep_max(body_weight?, set.weight, set.reps).ok()
        }
    }
}

/// Estimate from the heaviest qualifying working set of a single log.
fn latest_estimate(log: &ExerciseLog, body_weight: Option<f64>) -> Option<(f64, DateTime<Utc>)> {
    log.working_sets()
        .filter_map(|set| {
            let load = effective_load(log.load_kind, set, body_weight)?;
            let one_rm = set_one_rep_max(log.load_kind, set, body_weight)?;
            Some((load, one_rm))
        })
        // Heaviest load first; more reps at the same load breaks the tie
        .max_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)))
        .map(|(_, one_rm)| (one_rm, log.performed_at))
}

/// Best estimate across every working set of every log.
fn best_estimate<'a>(
    logs: impl IntoIterator<Item = &'a ExerciseLog>,
    body_weight: Option<f64>,
) -> Option<(f64, DateTime<Utc>)> {
    logs.into_iter()
        .flat_map(|log| {
            log.working_sets().filter_map(move |set| {
                set_one_rep_max(log.load_kind, set, body_weight).map(|rm| (rm, log.performed_at))
            })
        })
        .max_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
}

/// Average exercise score per muscle group, ordered by group name.
pub fn muscle_group_standards(records: &[StrengthRecord]) -> Vec<MuscleGroupStandard> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        if let Some(group) = record.muscle_group.as_deref() {
            groups.entry(group).or_default().push(record.score);
        }
    }

    groups
        .into_iter()
        .map(|(group, scores)| {
            let average = round_to(scores.iter().sum::<f64>() / scores.len() as f64, 2);
            MuscleGroupStandard {
                muscle_group: group.to_string(),
                exercise_count: scores.len() as u32,
                average_score: average,
                tier: classify_strength(average),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SetType, StrengthTier};
    use chrono::TimeZone;

    fn log(id: &str, day: u32, kind: LoadKind, sets: Vec<SetEntry>) -> ExerciseLog {
        ExerciseLog {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            exercise_id: "bench".to_string(),
            exercise_name: "Bench Press".to_string(),
            muscle_group: Some("chest".to_string()),
            load_kind: kind,
            performed_at: Utc.with_ymd_and_hms(2024, 3, day, 18, 0, 0).unwrap(),
            completed_sets: sets.len() as u32,
            total_volume: sets.iter().map(|s| s.weight * s.reps as f64).sum(),
            sets,
        }
    }

    fn set(weight: f64, reps: u32, set_type: SetType) -> SetEntry {
        SetEntry {
            weight,
            reps,
            set_type,
        }
    }

    #[test]
    fn test_best_estimate_ignores_non_working_sets() {
        let logs = vec![log(
            "l1",
            1,
            LoadKind::Weighted,
            vec![
                set(60.0, 10, SetType::WarmUp),
                set(100.0, 5, SetType::Working),
                set(120.0, 8, SetType::Failure),
                set(80.0, 12, SetType::Drop),
            ],
        )];

        let (one_rm, _) = best_estimate(&logs, None).unwrap();
        assert_eq!(one_rm, estimate_one_rep_max(100.0, 5).unwrap());
    }

    #[test]
    fn test_best_estimate_skips_sets_outside_domain() {
        let logs = vec![log(
            "l1",
            1,
            LoadKind::Weighted,
            vec![set(40.0, 50, SetType::Working), set(0.0, 5, SetType::Working)],
        )];
        assert_eq!(best_estimate(&logs, None), None);
    }

    #[test]
    fn test_latest_estimate_uses_heaviest_set() {
        // 90x8 estimates higher than 100x1 but 100 is the heaviest load
        let l = log(
            "l1",
            1,
            LoadKind::Weighted,
            vec![set(90.0, 8, SetType::Working), set(100.0, 1, SetType::Working)],
        );
        let (one_rm, _) = latest_estimate(&l, None).unwrap();
        assert_eq!(one_rm, 100.0);
    }

    #[test]
    fn test_bodyweight_and_assisted_loads() {
        let pullups = log("l1", 1, LoadKind::Bodyweight, vec![set(10.0, 5, SetType::Working)]);
        let (one_rm, _) = best_estimate(&[pullups.clone()], Some(80.0)).unwrap();
        assert_eq!(one_rm, estimate_one_rep_max(90.0, 5).unwrap());
        assert_eq!(best_estimate(&[pullups], None), None);

        let assisted = log("l2", 1, LoadKind::Assisted, vec![set(30.0, 8, SetType::Working)]);
        let (one_rm, _) = best_estimate(&[assisted], Some(80.0)).unwrap();
        assert_eq!(one_rm, estimate_one_rep_max(50.0, 8).unwrap());
    }

    #[test]
    fn test_muscle_group_standards_average_scores() {
        let record = |id: &str, group: Option<&str>, score: f64| StrengthRecord {
            exercise_id: id.to_string(),
            exercise_name: id.to_string(),
            muscle_group: group.map(String::from),
            one_rep_max: 100.0,
            relative_strength: score / 100.0,
            score,
            tier: classify_strength(score),
            last_performed: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        };
        let records = vec![
            record("bench", Some("chest"), 100.0),
            record("fly", Some("chest"), 50.0),
            record("squat", Some("legs"), 120.0),
            record("plank", None, 10.0),
        ];

        let groups = muscle_group_standards(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].muscle_group, "chest");
        assert_eq!(groups[0].exercise_count, 2);
        assert_eq!(groups[0].average_score, 75.0);
        assert_eq!(groups[0].tier, StrengthTier::Advanced);
        assert_eq!(groups[1].tier, StrengthTier::Elite);
    }
}
