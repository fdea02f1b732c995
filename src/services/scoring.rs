// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Competition scoring.
//!
//! Pure function of (activity, competitions, now): no I/O, no retries.
//! Callers must pass the competitions as they were *before* this activity was
//! applied; re-running on an already-updated list double counts.

use crate::models::{Competition, LeaderboardEntry, Participant, RecordedActivity, ScoringRule};
use chrono::{DateTime, Utc};

/// Flat award for rule kinds without a dedicated formula.
pub const GENERIC_EFFORT_POINTS: u64 = 10;

/// Steps assumed per kilometer for the steps rule.
const STEPS_PER_KM: f64 = 1250.0;

/// Steps per point for the steps rule.
const STEPS_PER_POINT: f64 = 1000.0;

/// Points an activity earns under a scoring rule.
pub fn points_for(rule: ScoringRule, activity: &RecordedActivity) -> u64 {
    match rule {
        ScoringRule::Distance => floor_points(activity.distance_km),
        ScoringRule::Duration => activity.elapsed_seconds / 60,
        ScoringRule::Calories => floor_points(activity.calories.unwrap_or(0.0) / 100.0),
        ScoringRule::Steps => {
            let steps = (activity.distance_km * STEPS_PER_KM).floor();
            floor_points(steps / STEPS_PER_POINT)
        }
        ScoringRule::ActiveDays | ScoringRule::CheckinCount => 1,
        ScoringRule::Other => GENERIC_EFFORT_POINTS,
    }
}

/// Whole points from a non-negative quantity; anything else scores zero.
fn floor_points(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Apply an activity to every competition active at `now`.
///
/// Returns a full replacement list in the same order. Inactive competitions
/// are returned unchanged.
pub fn apply_activity(
    activity: &RecordedActivity,
    competitions: &[Competition],
    participant: &Participant,
    now: DateTime<Utc>,
) -> Vec<Competition> {
    competitions
        .iter()
        .map(|competition| {
            if !competition.is_active(now) {
                return competition.clone();
            }

            let points = points_for(competition.scoring_rule, activity);
            let scored = score_competition(competition, participant, points);

            tracing::debug!(
                competition_id = %competition.id,
                rule = ?competition.scoring_rule,
                points,
                new_score = scored.current_user_score,
                "Scored activity"
            );

            scored
        })
        .collect()
}

/// Add points to one competition and re-rank its leaderboard.
fn score_competition(
    competition: &Competition,
    participant: &Participant,
    points: u64,
) -> Competition {
    let mut updated = competition.clone();
    updated.current_user_score = competition.current_user_score.saturating_add(points);

    match updated
        .leaderboard
        .iter_mut()
        .find(|e| e.user_id == participant.user_id)
    {
        Some(entry) => entry.score = entry.score.saturating_add(points),
        None => updated.leaderboard.push(LeaderboardEntry {
            user_id: participant.user_id.clone(),
            name: participant.name.clone(),
            avatar: participant.avatar.clone(),
            score: updated.current_user_score,
        }),
    }

    // Stable: ties keep their existing relative order.
    updated.leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
    updated
}
