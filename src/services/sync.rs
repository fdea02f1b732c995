// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Two-phase commit of a finalized activity.
//!
//! Handles:
//! - Scoring against the pre-update competition snapshot
//! - Optimistic update of the local profile state
//! - Best-effort remote persistence
//! - Rollback of the optimistic update when persistence fails

use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::models::{Competition, Participant, RecordedActivity};
use crate::services::scoring::apply_activity;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;

/// Write sink for finalized activities and updated competitions.
pub trait ActivitySink: Send + Sync {
    fn persist(
        &self,
        activity: &RecordedActivity,
        competitions: &[Competition],
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Locally held copy of the user's profile data.
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    /// Most recent first
    pub activities: Vec<RecordedActivity>,
    pub competitions: Vec<Competition>,
}

impl ProfileState {
    pub fn has_activity(&self, activity: &RecordedActivity) -> bool {
        self.activities.iter().any(|a| a.id == activity.id)
    }
}

/// Result of a commit.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Scored and persisted.
    Committed,
    /// Activity was already in the profile; nothing re-applied.
    AlreadyCommitted,
}

/// Score, apply optimistically, persist, and roll back on failure.
///
/// On error the profile state is exactly what it was before the call.
pub async fn commit_activity<S: ActivitySink>(
    sink: &S,
    state: &mut ProfileState,
    activity: RecordedActivity,
    participant: &Participant,
    now: DateTime<Utc>,
) -> Result<CommitOutcome> {
    // Idempotency check: scoring twice would double count
    if state.has_activity(&activity) {
        tracing::debug!(activity_id = %activity.id, "Activity already committed");
        return Ok(CommitOutcome::AlreadyCommitted);
    }

    let previous = state.competitions.clone();
    let updated = apply_activity(&activity, &previous, participant, now);

    state.activities.insert(0, activity.clone());
    state.competitions = updated;

    match sink.persist(&activity, &state.competitions).await {
        Ok(()) => {
            tracing::info!(
                activity_id = %activity.id,
                competitions = state.competitions.len(),
                "Activity committed"
            );
            Ok(CommitOutcome::Committed)
        }
        Err(e) => {
            tracing::warn!(
                activity_id = %activity.id,
                error = %e,
                "Persistence failed, rolling back local update"
            );
            state.activities.retain(|a| a.id != activity.id);
            state.competitions = previous;
            Err(e)
        }
    }
}

/// Request body for the remote sink.
#[derive(Serialize)]
struct PersistRequest<'a> {
    activity: &'a RecordedActivity,
    competitions: &'a [Competition],
    submitted_at: String,
}

/// HTTP activity sink (JSON POST with bearer auth).
#[derive(Clone)]
pub struct HttpActivitySink {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpActivitySink {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build a sink from config, if an endpoint is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .persistence_url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.persistence_token.clone()))
    }

    pub fn activities_url(&self) -> String {
        format!("{}/activities", self.base_url)
    }

    /// Check response status and return error if not successful.
    async fn check_response(response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Activity sink rate limit hit (429)");
            return Err(TrackerError::Persistence("rate limited".to_string()));
        }

        Err(TrackerError::Persistence(format!("HTTP {}: {}", status, body)))
    }
}

impl ActivitySink for HttpActivitySink {
    async fn persist(
        &self,
        activity: &RecordedActivity,
        competitions: &[Competition],
    ) -> Result<()> {
        let body = PersistRequest {
            activity,
            competitions,
            submitted_at: format_utc_rfc3339(Utc::now()),
        };

        let mut request = self.http.post(self.activities_url()).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TrackerError::Persistence(e.to_string()))?;

        Self::check_response(response).await
    }
}
