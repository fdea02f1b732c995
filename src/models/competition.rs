// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Competition and leaderboard model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Formula used to convert an activity into competition points.
///
/// Unrecognized kinds deserialize to [`ScoringRule::Other`] so a single bad
/// record cannot fail a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ScoringRule {
    Distance,
    Duration,
    Calories,
    Steps,
    ActiveDays,
    CheckinCount,
    #[serde(other)]
    Other,
}

/// One participant's standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub name: String,
    pub avatar: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub score: u64,
}

/// The user being scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    pub name: String,
    pub avatar: Option<String>,
}

/// A time-boxed competition the user has joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub scoring_rule: ScoringRule,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub current_user_score: u64,
    /// Sorted by score, descending; one entry per user
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl Competition {
    /// Whether `now` falls within `[start_date, end_date]`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    /// 1-based rank of a user on the leaderboard.
    pub fn rank_of(&self, user_id: &str) -> Option<usize> {
        self.leaderboard
            .iter()
            .position(|e| e.user_id == user_id)
            .map(|i| i + 1)
    }
}
