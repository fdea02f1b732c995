// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Noise rejection for incoming location samples.
//!
//! Two independent filters run on every sample, elevation first:
//! - vertical: altitude deltas count as gain only inside `(0.5, 10)` meters
//! - horizontal: moves shorter than 2 meters are dropped before they reach the path

use crate::geodesy::distance;
use crate::models::LatLng;

/// Smallest horizontal move (meters) accepted into the path.
pub const MIN_MOVEMENT_METERS: f64 = 2.0;

/// Climb deltas at or below this (meters) are jitter.
pub const MIN_ELEVATION_DELTA_METERS: f64 = 0.5;

/// Climb deltas at or above this (meters) are sensor glitches.
pub const MAX_ELEVATION_DELTA_METERS: f64 = 10.0;

/// Tracks the altitude baseline and decides which climbs count as gain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElevationFilter {
    last_altitude: Option<f64>,
}

impl ElevationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one altitude reading, returning the gain it contributes.
    ///
    /// The baseline always moves to the newest reading so rejected spikes do
    /// not compound into later deltas.
    pub fn observe(&mut self, altitude: Option<f64>) -> f64 {
        let Some(altitude) = altitude.filter(|a| a.is_finite()) else {
            return 0.0;
        };

        let previous = self.last_altitude.replace(altitude);
        match previous {
            None => 0.0,
            Some(last) => {
                let delta = altitude - last;
                if delta > MIN_ELEVATION_DELTA_METERS && delta < MAX_ELEVATION_DELTA_METERS {
                    delta
                } else {
                    tracing::trace!(delta, "Elevation delta rejected");
                    0.0
                }
            }
        }
    }

    pub fn baseline(&self) -> Option<f64> {
        self.last_altitude
    }
}

/// Outcome of the horizontal movement check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// First point of the path; appended unconditionally.
    First,
    /// Far enough from the last point; carries the delta in km.
    Moved(f64),
    /// Within the noise radius; the sample is discarded.
    Jitter,
}

/// Classify a new point against the last accepted one.
pub fn classify_movement(last: Option<LatLng>, next: LatLng) -> Movement {
    let Some(last) = last else {
        return Movement::First;
    };

    let delta_km = distance(last, next);
    if delta_km * 1000.0 > MIN_MOVEMENT_METERS {
        Movement::Moved(delta_km)
    } else {
        Movement::Jitter
    }
}
