// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity disciplines offered by the recorder.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// An activity discipline. The catalog order is the picker order; the first
/// entry is the default selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Sport {
    Running,
    Cycling,
    Walking,
    Hiking,
    ResistanceTraining,
}

const CATALOG: [Sport; 5] = [
    Sport::Running,
    Sport::Cycling,
    Sport::Walking,
    Sport::Hiking,
    Sport::ResistanceTraining,
];

impl Sport {
    /// All selectable disciplines, in display order.
    pub fn catalog() -> &'static [Sport] {
        &CATALOG
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Sport::Running => "Running",
            Sport::Cycling => "Cycling",
            Sport::Walking => "Walking",
            Sport::Hiking => "Hiking",
            Sport::ResistanceTraining => "Resistance Training",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Sport::Running => "🏃",
            Sport::Cycling => "🚴",
            Sport::Walking => "🚶",
            Sport::Hiking => "🥾",
            Sport::ResistanceTraining => "🏋️",
        }
    }

    /// Whether this discipline records a workout checklist instead of a route.
    pub fn is_workout(self) -> bool {
        matches!(self, Sport::ResistanceTraining)
    }
}

impl Default for Sport {
    fn default() -> Self {
        CATALOG[0]
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
