// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Accumulated metrics for a recording session.

use crate::time_utils::{format_duration, format_pace};
use serde::{Deserialize, Serialize};

/// Running totals for the active session.
///
/// Pace is derived on every read from distance and elapsed time; it is never
/// stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub distance_km: f64,
    pub elapsed_seconds: u64,
    pub elevation_gain_meters: f64,
}

impl SessionMetrics {
    /// Seconds per kilometer, or `None` before any distance is covered.
    pub fn pace_seconds_per_km(&self) -> Option<f64> {
        if self.distance_km > 0.0 {
            Some(self.elapsed_seconds as f64 / self.distance_km)
        } else {
            None
        }
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.elapsed_seconds)
    }

    pub fn formatted_pace(&self) -> String {
        format_pace(self.pace_seconds_per_km().unwrap_or(f64::INFINITY))
    }

    pub fn formatted_distance(&self) -> String {
        format!("{:.2}", self.distance_km)
    }
}
