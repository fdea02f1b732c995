// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - tracking engine and its collaborators.

pub mod filter;
pub mod finalizer;
pub mod providers;
pub mod recorder;
pub mod scoring;
pub mod session;
pub mod static_map;
pub mod sync;

pub use filter::ElevationFilter;
pub use finalizer::finalize;
pub use providers::{
    Clock, IntervalClock, LocationEvent, LocationProvider, RoutineStore, Subscription,
    WeeklyRoutineStore,
};
pub use recorder::SessionRecorder;
pub use scoring::{apply_activity, points_for};
pub use session::{SessionSnapshot, SessionStatus, StartMode, TrackingSession};
pub use static_map::{MapStyle, StaticMapService};
pub use sync::{commit_activity, ActivitySink, CommitOutcome, HttpActivitySink, ProfileState};
