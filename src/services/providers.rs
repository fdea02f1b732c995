// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Boundary contracts for the producers and stores the recorder consumes.
//!
//! Producers hand back a channel receiver; dropping the receiver is the
//! unsubscribe. The recorder wraps each consumer task in a [`Subscription`]
//! so cancellation happens even on early returns and teardown.

use crate::models::{DailyWorkout, LocationSample};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Buffered events per location subscription.
pub const LOCATION_CHANNEL_CAPACITY: usize = 64;

/// Event delivered by a location provider.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    Sample(LocationSample),
    /// Permission denied, timeout, etc. Recoverable.
    Error(String),
}

/// Source of location samples (GPS, replay, test channel).
pub trait LocationProvider: Send + Sync {
    /// Start delivering events. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> mpsc::Receiver<LocationEvent>;
}

/// Source of 1 Hz ticks while tracking.
pub trait Clock: Send + Sync {
    /// Start ticking. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> mpsc::Receiver<()>;
}

/// Read-only source of the user's stored routine.
pub trait RoutineStore: Send + Sync {
    fn workout_for(&self, date: NaiveDate) -> Option<DailyWorkout>;
}

/// Handle to a consumer task. Aborts the task when cancelled or dropped.
#[derive(Debug)]
pub struct Subscription {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn new(name: &'static str, handle: JoinHandle<()>) -> Self {
        Self { name, handle }
    }

    pub fn cancel(self) {
        // Drop does the abort.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(subscription = self.name, "Subscription cancelled");
    }
}

/// Wall clock backed by `tokio::time::interval`.
#[derive(Debug, Clone)]
pub struct IntervalClock {
    period: Duration,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Clock for IntervalClock {
    fn subscribe(&self) -> mpsc::Receiver<()> {
        let (tx, rx) = mpsc::channel(1);
        let period = self.period;

        tokio::spawn(async move {
            // First tick lands one full period after subscribing.
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if tx.send(()).await.is_err() {
                            break;
                        }
                    }
                    _ = tx.closed() => break,
                }
            }
        });

        rx
    }
}

/// Routine keyed by weekday.
#[derive(Debug, Clone, Default)]
pub struct WeeklyRoutineStore {
    days: HashMap<Weekday, DailyWorkout>,
}

impl WeeklyRoutineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, weekday: Weekday, workout: DailyWorkout) -> Self {
        self.days.insert(weekday, workout);
        self
    }
}

impl RoutineStore for WeeklyRoutineStore {
    fn workout_for(&self, date: NaiveDate) -> Option<DailyWorkout> {
        self.days.get(&date.weekday()).cloned()
    }
}
