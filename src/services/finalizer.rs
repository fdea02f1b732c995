// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Converts a finished session into an immutable [`RecordedActivity`].

use crate::models::{RecordedActivity, WorkoutSummary};
use crate::services::session::FinishedSession;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Build the recorded activity for a finished session.
///
/// `map_image_url` is whatever the static map service produced (if anything);
/// `kcal_per_minute` drives the workout-mode energy estimate.
pub fn finalize(
    finished: FinishedSession,
    map_image_url: Option<String>,
    kcal_per_minute: f64,
    now: DateTime<Utc>,
) -> RecordedActivity {
    let metrics = finished.metrics;

    let (title, calories, workout) = match finished.checklist {
        Some((daily, completed)) => {
            let day_label = daily.day_label();
            let minutes = metrics.elapsed_seconds as f64 / 60.0;
            (
                Some(format!("{} — {}", finished.sport.display_name(), day_label)),
                Some(estimate_calories(minutes, kcal_per_minute)),
                Some(WorkoutSummary {
                    day_label,
                    completed_exercise_ids: completed,
                    total_exercises: daily.exercises.len(),
                }),
            )
        }
        None => (None, None, None),
    };

    let activity = RecordedActivity {
        id: Uuid::new_v4(),
        date: now,
        sport: finished.sport,
        distance_km: metrics.distance_km,
        elapsed_seconds: metrics.elapsed_seconds,
        pace_seconds_per_km: metrics.pace_seconds_per_km(),
        elevation_gain_meters: metrics.elevation_gain_meters,
        calories,
        // Checklist sessions never carry a route.
        map_image_url: if workout.is_some() { None } else { map_image_url },
        title,
        workout,
    };

    tracing::info!(
        activity_id = %activity.id,
        sport = %activity.sport,
        distance_km = activity.distance_km,
        elapsed_seconds = activity.elapsed_seconds,
        has_map = activity.map_image_url.is_some(),
        "Session finalized"
    );

    activity
}

/// Energy estimate (kcal), rounded to whole calories.
fn estimate_calories(minutes: f64, kcal_per_minute: f64) -> f64 {
    (minutes * kcal_per_minute).round()
}
