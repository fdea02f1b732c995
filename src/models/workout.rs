// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Resistance training routine model.

use serde::{Deserialize, Serialize};

/// One exercise in a day's routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable identifier, used for checklist membership
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Working weight in kg (None for bodyweight)
    pub weight_kg: Option<f64>,
}

/// The routine scheduled for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWorkout {
    /// Position of this day in the user's split (1-based)
    pub day_number: u32,
    /// Optional focus label, e.g. "Push"
    pub focus: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl DailyWorkout {
    /// Label used for activity titles, e.g. "Day 2".
    pub fn day_label(&self) -> String {
        format!("Day {}", self.day_number)
    }

    pub fn contains(&self, exercise_id: &str) -> bool {
        self.exercises.iter().any(|e| e.id == exercise_id)
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
