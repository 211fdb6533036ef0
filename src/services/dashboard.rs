// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard analytics over a user's activity history.
//!
//! Two windows feed one report: the requested `[start, end]` range drives
//! the totals and most-active analysis, while the frequency graph and the
//! streaks always cover the trailing [`FREQUENCY_WINDOW_DAYS`] ending today.

use crate::db::ActivityRepository;
use crate::error::{AppError, Result};
use crate::formulas::round_to;
use crate::models::{
    ActivityAnalysis, ActivitySample, DailyFrequencyPoint, DashboardReport, ExerciseLog,
    FrequencyGraph, SessionStatus, TimeOfDay, WorkoutSession,
};
use crate::time_utils::{local_date, Clock};
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc, Weekday,
};
use std::collections::HashMap;
use std::sync::Arc;

pub const FREQUENCY_WINDOW_DAYS: usize = 30;
pub const TREND_WINDOW: usize = 7;
/// A streak counts as current if it is alive on either of the last two days.
const CURRENT_STREAK_GRACE_DAYS: usize = 2;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Builds dashboard reports from the activity repository.
#[derive(Clone)]
pub struct DashboardService {
    activities: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
    timezone: FixedOffset,
}

impl DashboardService {
    pub fn new(
        activities: Arc<dyn ActivityRepository>,
        clock: Arc<dyn Clock>,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            activities,
            clock,
            timezone,
        }
    }

    /// Report for `[start_date, end_date]` (local calendar days, inclusive).
    pub async fn get_dashboard(
        &self,
        owner_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<DashboardReport> {
        if end_date < start_date {
            return Err(AppError::invalid(format!(
                "end date {} is before start date {}",
                end_date, start_date
            )));
        }

        let now = self.clock.now();
        let today = local_date(now, &self.timezone);
        let window_start = today - Duration::days(FREQUENCY_WINDOW_DAYS as i64 - 1);

        let (range_from, range_to) = self.day_bounds(start_date, end_date);
        let (window_from, window_to) = self.day_bounds(window_start, today);

        let (sessions, logs, window_sessions, window_logs) = tokio::try_join!(
            self.activities.find_sessions(owner_id, range_from, range_to),
            self.activities.find_logs(owner_id, range_from, range_to),
            self.activities.find_sessions(owner_id, window_from, window_to),
            self.activities.find_logs(owner_id, window_from, window_to),
        )?;

        tracing::debug!(
            owner_id,
            sessions = sessions.len(),
            logs = logs.len(),
            window_sessions = window_sessions.len(),
            window_logs = window_logs.len(),
            "Loaded activity for dashboard"
        );

        let window_samples = samples(&window_sessions, &window_logs);
        let points = frequency_series(
            &window_samples,
            today,
            FREQUENCY_WINDOW_DAYS,
            &self.timezone,
        );
        let counts: Vec<u32> = points.iter().map(|p| p.count).collect();
        let trend = moving_average(&counts, TREND_WINDOW);
        let streaks = compute_streaks(&counts);

        let range_samples = samples(&sessions, &logs);
        let buckets = bucket_samples(&range_samples, &self.timezone);
        let totals = compute_totals(&sessions, &logs, now);

        Ok(DashboardReport {
            frequency_graph: FrequencyGraph { points, trend },
            analysis: ActivityAnalysis {
                most_active_day: most_active_day(&buckets.by_weekday).map(weekday_name),
                most_active_time: most_active_time(&buckets.by_time_of_day),
                current_streak: streaks.current,
                best_streak: streaks.best,
                total_workouts: totals.workouts,
                total_exercise_logs: totals.exercise_logs,
                total_volume: totals.volume,
                weekly_average: totals.weekly_average,
                average_workout_duration_minutes: totals.average_duration_minutes,
            },
        })
    }

    /// UTC instants spanning the local days `first..=last`.
    fn day_bounds(&self, first: NaiveDate, last: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let from = self.local_midnight(first);
        let to = self.local_midnight(last + Duration::days(1)) - Duration::seconds(1);
        (from, to)
    }

    fn local_midnight(&self, day: NaiveDate) -> DateTime<Utc> {
        let offset = Duration::seconds(self.timezone.local_minus_utc() as i64);
        (day.and_time(NaiveTime::MIN) - offset).and_utc()
    }
}

/// Completed sessions and all logs as one sample list.
pub fn samples<'a>(
    sessions: &'a [WorkoutSession],
    logs: &'a [ExerciseLog],
) -> Vec<ActivitySample<'a>> {
    sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .map(ActivitySample::Session)
        .chain(logs.iter().map(ActivitySample::Log))
        .collect()
}

/// Per-day, per-weekday, and per-time-of-day activity counts.
#[derive(Debug, Default)]
pub struct Buckets {
    pub by_day: HashMap<NaiveDate, u32>,
    pub by_weekday: HashMap<Weekday, u32>,
    pub by_time_of_day: HashMap<TimeOfDay, u32>,
}

pub fn bucket_samples(samples: &[ActivitySample<'_>], tz: &FixedOffset) -> Buckets {
    let mut buckets = Buckets::default();
    for sample in samples {
        let local = sample.at().with_timezone(tz);
        *buckets.by_day.entry(local.date_naive()).or_insert(0) += 1;
        *buckets.by_weekday.entry(local.weekday()).or_insert(0) += 1;
        *buckets
            .by_time_of_day
            .entry(TimeOfDay::from_hour(local.hour()))
            .or_insert(0) += 1;
    }
    buckets
}

/// `days` points ending at `today`, oldest first, zero-filled.
pub fn frequency_series(
    samples: &[ActivitySample<'_>],
    today: NaiveDate,
    days: usize,
    tz: &FixedOffset,
) -> Vec<DailyFrequencyPoint> {
    let by_day = bucket_samples(samples, tz).by_day;
    (0..days)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back as i64);
            DailyFrequencyPoint {
                label: day.format("%Y-%m-%d").to_string(),
                count: by_day.get(&day).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Trailing moving average. The window for index `i` is
/// `max(0, i - window + 1)..=i`, so early points average what exists.
pub fn moving_average(values: &[u32], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let from = (i + 1).saturating_sub(window);
            let slice = &values[from..=i];
            let sum: u32 = slice.iter().sum();
            sum as f64 / slice.len() as f64
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streaks {
    pub current: u32,
    pub best: u32,
}

/// Consecutive-day streaks over a chronological count series.
///
/// `current` is the running streak as last seen on one of the final two
/// days; a gap on both of them means there is no current streak.
pub fn compute_streaks(counts: &[u32]) -> Streaks {
    let grace_from = counts.len().saturating_sub(CURRENT_STREAK_GRACE_DAYS);
    let mut running = 0;
    let mut streaks = Streaks::default();

    for (i, &count) in counts.iter().enumerate() {
        running = if count > 0 { running + 1 } else { 0 };
        streaks.best = streaks.best.max(running);
        if i >= grace_from && running > 0 {
            streaks.current = running;
        }
    }
    streaks
}

/// Arg-max scanning Monday..Sunday; the earliest weekday wins ties.
pub fn most_active_day(by_weekday: &HashMap<Weekday, u32>) -> Option<Weekday> {
    arg_max(WEEKDAYS, by_weekday)
}

/// Arg-max scanning Morning..Night; the earliest band wins ties.
pub fn most_active_time(by_time: &HashMap<TimeOfDay, u32>) -> Option<TimeOfDay> {
    arg_max(TimeOfDay::ALL, by_time)
}

fn arg_max<K, const N: usize>(order: [K; N], counts: &HashMap<K, u32>) -> Option<K>
where
    K: Copy + Eq + std::hash::Hash,
{
    let mut best: Option<(K, u32)> = None;
    for key in order {
        let count = counts.get(&key).copied().unwrap_or(0);
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((key, count));
        }
    }
    best.map(|(k, _)| k)
}

pub fn weekday_name(day: Weekday) -> String {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
    .to_string()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Totals {
    pub workouts: u32,
    pub exercise_logs: u32,
    pub volume: f64,
    pub weekly_average: f64,
    pub average_duration_minutes: f64,
}

/// Range totals. Only completed sessions count as workouts.
pub fn compute_totals(
    sessions: &[WorkoutSession],
    logs: &[ExerciseLog],
    now: DateTime<Utc>,
) -> Totals {
    let all = samples(sessions, logs);
    let completed: Vec<&WorkoutSession> = all
        .iter()
        .filter_map(|s| match s {
            ActivitySample::Session(session) => Some(*session),
            ActivitySample::Log(_) => None,
        })
        .collect();

    let volume: f64 = all.iter().map(ActivitySample::volume).sum();

    let durations: Vec<f64> = completed.iter().filter_map(|s| s.duration_minutes()).collect();
    let average_duration_minutes = if durations.is_empty() {
        0.0
    } else {
        round_to(durations.iter().sum::<f64>() / durations.len() as f64, 1)
    };

    let weekly_average = match all.iter().map(ActivitySample::at).min() {
        Some(first) => round_to(all.len() as f64 / weeks_elapsed(first, now) as f64, 2),
        None => 0.0,
    };

    Totals {
        workouts: completed.len() as u32,
        exercise_logs: logs.len() as u32,
        volume: round_to(volume, 2),
        weekly_average,
        average_duration_minutes,
    }
}

/// Whole weeks since `first`, never less than 1.
pub fn weeks_elapsed(first: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ((now - first).num_hours() / (24 * 7)).max(1)
}
