// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Finalized activity model handed to persistence and scoring.

use crate::models::Sport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Immutable result of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordedActivity {
    /// Assigned at finalization
    pub id: Uuid,
    /// Finalization timestamp
    pub date: DateTime<Utc>,
    pub sport: Sport,
    pub distance_km: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub elapsed_seconds: u64,
    /// None when no distance was covered
    pub pace_seconds_per_km: Option<f64>,
    pub elevation_gain_meters: f64,
    /// Estimated energy (kcal), when the session can estimate it
    pub calories: Option<f64>,
    /// Static route map, when a route was recorded and the map service answered
    pub map_image_url: Option<String>,
    /// Custom title; defaults to the sport name when absent
    pub title: Option<String>,
    /// Checklist outcome for workout-mode sessions
    pub workout: Option<WorkoutSummary>,
}

impl RecordedActivity {
    /// Title for display, falling back to the sport name.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or_else(|| self.sport.display_name())
    }
}

/// Checklist outcome of a resistance training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSummary {
    pub day_label: String,
    pub completed_exercise_ids: Vec<String>,
    pub total_exercises: usize,
}

impl WorkoutSummary {
    pub fn completed(&self) -> usize {
        self.completed_exercise_ids.len()
    }
}
