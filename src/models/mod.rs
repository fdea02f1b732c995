// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the tracking engine.

pub mod activity;
pub mod competition;
pub mod location;
pub mod metrics;
pub mod sport;
pub mod workout;

pub use activity::{RecordedActivity, WorkoutSummary};
pub use competition::{Competition, LeaderboardEntry, Participant, ScoringRule};
pub use location::{LatLng, LocationSample, Path};
pub use metrics::SessionMetrics;
pub use sport::Sport;
pub use workout::{DailyWorkout, Exercise};
