// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracker error types with consistent user-facing messages.

use crate::services::session::SessionStatus;

/// Error type surfaced to the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Cannot {action} while session is {status}")]
    InvalidTransition {
        action: &'static str,
        status: SessionStatus,
    },

    #[error("No resistance training routine scheduled for today")]
    NoWorkoutToday,

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Sport can only be changed while idle")]
    SportLocked,

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl TrackerError {
    /// Short message suitable for a toast or banner.
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::InvalidTransition { action, .. } => {
                format!("You can't {} right now.", action)
            }
            TrackerError::NoWorkoutToday => {
                "No workout found for today. Set up your routine first.".to_string()
            }
            TrackerError::UnknownExercise(_) => {
                "That exercise isn't part of today's workout.".to_string()
            }
            TrackerError::SportLocked => "Finish or discard the current session first.".to_string(),
            TrackerError::Persistence(_) => {
                "Couldn't save your activity. Please try again.".to_string()
            }
        }
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
