// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recording session state machine.
//!
//! `Idle -> Tracking <-> Paused -> Finished`, with `discard` returning any
//! state to `Idle`. The session is a pure fold over transition commands,
//! location samples and clock ticks; the async wiring that feeds it lives in
//! [`crate::services::recorder`].

use crate::error::{Result, TrackerError};
use crate::models::{DailyWorkout, LatLng, LocationSample, Path, SessionMetrics, Sport};
use crate::services::filter::{classify_movement, ElevationFilter, Movement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Tracking,
    Paused,
    Finished,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Tracking => "tracking",
            SessionStatus::Paused => "paused",
            SessionStatus::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// How a successful `start` entered `Tracking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// New session; metrics and path were reset.
    Fresh,
    /// Continuing a paused session (or retrying after a location error).
    Resumed,
}

/// Effect of a single location sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Session not tracking a route; nothing changed.
    Ignored,
    /// Non-finite or out-of-range coordinate; dropped.
    Rejected,
    /// Point appended to the path.
    Appended,
    /// Sub-threshold move; only elevation and camera were updated.
    Jitter,
}

/// Route-recording state for outdoor disciplines.
#[derive(Debug, Clone, Default)]
pub struct GeoTrack {
    path: Path,
    distance_km: f64,
    elevation_gain_meters: f64,
    elevation: ElevationFilter,
}

impl GeoTrack {
    fn apply(&mut self, sample: &LocationSample) -> SampleOutcome {
        self.elevation_gain_meters += self.elevation.observe(sample.altitude);

        let point = sample.position();
        match classify_movement(self.path.last(), point) {
            Movement::First => {
                self.path.push(point);
                SampleOutcome::Appended
            }
            Movement::Moved(delta_km) => {
                self.distance_km += delta_km;
                self.path.push(point);
                SampleOutcome::Appended
            }
            Movement::Jitter => SampleOutcome::Jitter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Checklist state for workout-mode sessions.
#[derive(Debug, Clone)]
pub struct ChecklistTrack {
    workout: DailyWorkout,
    completed: BTreeSet<String>,
}

impl ChecklistTrack {
    fn new(workout: DailyWorkout) -> Self {
        Self {
            workout,
            completed: BTreeSet::new(),
        }
    }

    pub fn workout(&self) -> &DailyWorkout {
        &self.workout
    }

    pub fn is_completed(&self, exercise_id: &str) -> bool {
        self.completed.contains(exercise_id)
    }
}

/// Recording pipeline chosen by the sport at start.
#[derive(Debug, Clone)]
pub enum SessionKind {
    Geo(GeoTrack),
    Checklist(ChecklistTrack),
}

/// Everything the finalizer needs from a session that reached `Finished`.
#[derive(Debug, Clone)]
pub struct FinishedSession {
    pub sport: Sport,
    pub metrics: SessionMetrics,
    pub path: Path,
    /// Workout and completed exercise ids, for checklist sessions
    pub checklist: Option<(DailyWorkout, Vec<String>)>,
}

/// Read model for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub sport: Sport,
    pub metrics: SessionMetrics,
    pub pace_seconds_per_km: Option<f64>,
    pub path: Path,
    /// Latest raw position, for centering the map
    pub camera: Option<LatLng>,
    pub completed_exercises: Vec<String>,
    pub last_error: Option<String>,
}

/// A single recording session.
#[derive(Debug, Clone, Default)]
pub struct TrackingSession {
    status: SessionStatus,
    sport: Sport,
    elapsed_seconds: u64,
    track: Option<SessionKind>,
    camera: Option<LatLng>,
    last_error: Option<String>,
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    pub fn kind(&self) -> Option<&SessionKind> {
        self.track.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Change the discipline. Only allowed while idle.
    pub fn select_sport(&mut self, sport: Sport) -> Result<()> {
        if self.status != SessionStatus::Idle {
            return Err(TrackerError::SportLocked);
        }
        self.sport = sport;
        Ok(())
    }

    /// Enter `Tracking`.
    ///
    /// From `Idle` this starts a fresh session; from `Paused` (or from
    /// `Tracking` with a pending location error) it resumes without touching
    /// accumulated state. `todays_workout` is only consulted for a fresh
    /// workout-mode start; when it is missing or empty the start is refused
    /// and the sport reverts to the default.
    pub fn start(&mut self, todays_workout: Option<DailyWorkout>) -> Result<StartMode> {
        match self.status {
            SessionStatus::Idle => {
                let kind = if self.sport.is_workout() {
                    match todays_workout.filter(|w| !w.is_empty()) {
                        Some(workout) => SessionKind::Checklist(ChecklistTrack::new(workout)),
                        None => {
                            self.sport = Sport::default();
                            return Err(TrackerError::NoWorkoutToday);
                        }
                    }
                } else {
                    SessionKind::Geo(GeoTrack::default())
                };

                self.track = Some(kind);
                self.elapsed_seconds = 0;
                self.camera = None;
                self.last_error = None;
                self.status = SessionStatus::Tracking;
                Ok(StartMode::Fresh)
            }
            SessionStatus::Paused => {
                self.last_error = None;
                self.status = SessionStatus::Tracking;
                Ok(StartMode::Resumed)
            }
            SessionStatus::Tracking if self.last_error.is_some() => {
                self.last_error = None;
                Ok(StartMode::Resumed)
            }
            status => Err(TrackerError::InvalidTransition {
                action: "start",
                status,
            }),
        }
    }

    /// `Paused -> Tracking`.
    pub fn resume(&mut self) -> Result<StartMode> {
        if self.status != SessionStatus::Paused {
            return Err(TrackerError::InvalidTransition {
                action: "resume",
                status: self.status,
            });
        }
        self.start(None)
    }

    /// `Tracking -> Paused`. Metrics freeze as last computed.
    pub fn pause(&mut self) -> Result<()> {
        if self.status != SessionStatus::Tracking {
            return Err(TrackerError::InvalidTransition {
                action: "pause",
                status: self.status,
            });
        }
        self.status = SessionStatus::Paused;
        Ok(())
    }

    /// `Tracking | Paused -> Finished`, returning the data to finalize.
    pub fn finish(&mut self) -> Result<FinishedSession> {
        if !matches!(
            self.status,
            SessionStatus::Tracking | SessionStatus::Paused
        ) {
            return Err(TrackerError::InvalidTransition {
                action: "finish",
                status: self.status,
            });
        }
        self.status = SessionStatus::Finished;

        let (path, checklist) = match &self.track {
            Some(SessionKind::Geo(geo)) => (geo.path.clone(), None),
            Some(SessionKind::Checklist(list)) => (
                Path::new(),
                Some((
                    list.workout.clone(),
                    list.completed.iter().cloned().collect(),
                )),
            ),
            None => (Path::new(), None),
        };

        Ok(FinishedSession {
            sport: self.sport,
            metrics: self.metrics(),
            path,
            checklist,
        })
    }

    /// Return to `Idle` from any state, dropping path and metrics.
    pub fn discard(&mut self) {
        self.status = SessionStatus::Idle;
        self.track = None;
        self.elapsed_seconds = 0;
        self.camera = None;
        self.last_error = None;
    }

    /// Fold one location sample. No-op unless tracking a route.
    pub fn apply_sample(&mut self, sample: &LocationSample) -> SampleOutcome {
        if self.status != SessionStatus::Tracking {
            return SampleOutcome::Ignored;
        }
        let Some(SessionKind::Geo(geo)) = self.track.as_mut() else {
            return SampleOutcome::Ignored;
        };
        if !sample.position().is_valid() {
            tracing::debug!(?sample, "Dropping invalid location sample");
            return SampleOutcome::Rejected;
        }

        self.camera = Some(sample.position());
        geo.apply(sample)
    }

    /// Advance elapsed time by one second. Returns false if not tracking.
    pub fn tick(&mut self) -> bool {
        if self.status != SessionStatus::Tracking {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }

    /// Toggle an exercise in or out of the completed set.
    ///
    /// Returns whether the exercise is completed after the toggle.
    pub fn toggle_exercise(&mut self, exercise_id: &str) -> Result<bool> {
        let status = self.status;
        let list = match self.track.as_mut() {
            Some(SessionKind::Checklist(list))
                if matches!(status, SessionStatus::Tracking | SessionStatus::Paused) =>
            {
                list
            }
            _ => {
                return Err(TrackerError::InvalidTransition {
                    action: "update the workout checklist",
                    status,
                })
            }
        };

        if !list.workout.contains(exercise_id) {
            return Err(TrackerError::UnknownExercise(exercise_id.to_string()));
        }

        if list.completed.remove(exercise_id) {
            Ok(false)
        } else {
            list.completed.insert(exercise_id.to_string());
            Ok(true)
        }
    }

    /// Record a recoverable location error. Status is left unchanged.
    pub fn record_location_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.track {
            Some(SessionKind::Geo(geo)) => Some(&geo.path),
            _ => None,
        }
    }

    /// Current totals. Distance and elevation stay zero for checklist sessions.
    pub fn metrics(&self) -> SessionMetrics {
        let (distance_km, elevation_gain_meters) = match &self.track {
            Some(SessionKind::Geo(geo)) => (geo.distance_km, geo.elevation_gain_meters),
            _ => (0.0, 0.0),
        };
        SessionMetrics {
            distance_km,
            elapsed_seconds: self.elapsed_seconds,
            elevation_gain_meters,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let metrics = self.metrics();
        let completed_exercises = match &self.track {
            Some(SessionKind::Checklist(list)) => list.completed.iter().cloned().collect(),
            _ => Vec::new(),
        };

        SessionSnapshot {
            status: self.status,
            sport: self.sport,
            metrics,
            pace_seconds_per_km: metrics.pace_seconds_per_km(),
            path: self.path().cloned().unwrap_or_default(),
            camera: self.camera,
            completed_exercises,
            last_error: self.last_error.clone(),
        }
    }
}
