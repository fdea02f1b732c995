// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time and pace formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Rendered in place of a pace that cannot be computed yet.
pub const NO_PACE: &str = "--:--";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format elapsed seconds as `MM:SS`, or `HH:MM:SS` once past an hour.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Format a pace (seconds per km) as `MM:SS`.
///
/// Non-finite and non-positive inputs render as [`NO_PACE`].
pub fn format_pace(seconds_per_km: f64) -> String {
    if !seconds_per_km.is_finite() || seconds_per_km <= 0.0 {
        return NO_PACE.to_string();
    }

    let total = seconds_per_km.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
