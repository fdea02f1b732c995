// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Async driver for a recording session.
//!
//! Wires the clock and location producers into a shared [`TrackingSession`]:
//! 1. `start`/`resume` subscribe (clock always, location for route sessions)
//! 2. consumer tasks fold ticks and samples under the session lock
//! 3. every exit from tracking cancels both subscriptions before the status
//!    change, so nothing arriving afterwards can mutate a frozen session
//! 4. `finish` renders the route map (outside the lock) and finalizes

use crate::config::Config;
use crate::error::Result;
use crate::models::{RecordedActivity, Sport};
use crate::services::finalizer::finalize;
use crate::services::providers::{
    Clock, LocationEvent, LocationProvider, RoutineStore, Subscription,
};
use crate::services::session::{
    SampleOutcome, SessionKind, SessionSnapshot, SessionStatus, StartMode, TrackingSession,
};
use crate::services::static_map::StaticMapService;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Owns one session at a time plus its producer subscriptions.
pub struct SessionRecorder {
    session: Arc<Mutex<TrackingSession>>,
    location: Arc<dyn LocationProvider>,
    clock: Arc<dyn Clock>,
    routines: Arc<dyn RoutineStore>,
    map: StaticMapService,
    kcal_per_minute: f64,
    /// Live consumer tasks; dropping them cancels.
    subscriptions: Vec<Subscription>,
}

impl SessionRecorder {
    pub fn new(
        config: &Config,
        location: Arc<dyn LocationProvider>,
        clock: Arc<dyn Clock>,
        routines: Arc<dyn RoutineStore>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(TrackingSession::new())),
            location,
            clock,
            routines,
            map: StaticMapService::new(config),
            kcal_per_minute: config.workout_kcal_per_minute,
            subscriptions: Vec::new(),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.lock().await.status()
    }

    /// Number of live producer subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub async fn select_sport(&self, sport: Sport) -> Result<()> {
        self.session.lock().await.select_sport(sport)
    }

    /// Start (or resume) recording, using today's date for the routine lookup.
    pub async fn start(&mut self) -> Result<StartMode> {
        self.start_on(Utc::now().date_naive()).await
    }

    /// Start (or resume) recording with an explicit "today".
    pub async fn start_on(&mut self, today: NaiveDate) -> Result<StartMode> {
        let mut session = self.session.lock().await;

        let workout = if session.status() == SessionStatus::Idle && session.sport().is_workout() {
            self.routines.workout_for(today)
        } else {
            None
        };

        let mode = match session.start(workout) {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!(error = %e, sport = %session.sport(), "Start refused");
                return Err(e);
            }
        };
        let track_route = matches!(session.kind(), Some(SessionKind::Geo(_)));
        let sport = session.sport();
        drop(session);

        // A retry while tracking replaces the failed subscriptions.
        self.cancel_subscriptions();
        self.subscribe(track_route);

        tracing::info!(sport = %sport, mode = ?mode, track_route, "Recording started");
        Ok(mode)
    }

    /// `Paused -> Tracking` without resetting accumulated state.
    pub async fn resume(&mut self) -> Result<StartMode> {
        let mut session = self.session.lock().await;
        let mode = session.resume()?;
        let track_route = matches!(session.kind(), Some(SessionKind::Geo(_)));
        drop(session);

        self.cancel_subscriptions();
        self.subscribe(track_route);

        tracing::info!("Recording resumed");
        Ok(mode)
    }

    pub async fn pause(&mut self) -> Result<()> {
        self.cancel_subscriptions();
        self.session.lock().await.pause()?;
        tracing::info!("Recording paused");
        Ok(())
    }

    /// Stop recording and produce the finalized activity.
    ///
    /// The route map is requested only for paths with more than one point;
    /// its failure leaves `map_image_url` empty and never blocks finishing.
    pub async fn finish(&mut self) -> Result<RecordedActivity> {
        self.cancel_subscriptions();
        let finished = self.session.lock().await.finish()?;

        let map_image_url = if finished.path.len() > 1 {
            self.map.render(&finished.path).await
        } else {
            None
        };

        Ok(finalize(
            finished,
            map_image_url,
            self.kcal_per_minute,
            Utc::now(),
        ))
    }

    /// Return to idle from any state without finalizing.
    pub async fn discard(&mut self) {
        self.cancel_subscriptions();
        self.session.lock().await.discard();
        tracing::info!("Session discarded");
    }

    pub async fn toggle_exercise(&self, exercise_id: &str) -> Result<bool> {
        self.session.lock().await.toggle_exercise(exercise_id)
    }

    pub async fn dismiss_error(&self) {
        self.session.lock().await.dismiss_error();
    }

    fn subscribe(&mut self, track_route: bool) {
        let mut ticks = self.clock.subscribe();
        let session = Arc::clone(&self.session);
        let ticker = tokio::spawn(async move {
            while ticks.recv().await.is_some() {
                session.lock().await.tick();
            }
        });
        self.subscriptions.push(Subscription::new("clock", ticker));

        if !track_route {
            return;
        }

        let mut events = self.location.subscribe();
        let session = Arc::clone(&self.session);
        let locator = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let mut session = session.lock().await;
                match event {
                    LocationEvent::Sample(sample) => {
                        if session.apply_sample(&sample) == SampleOutcome::Jitter {
                            tracing::trace!(
                                lat = sample.latitude,
                                lng = sample.longitude,
                                "Sample below movement threshold"
                            );
                        }
                    }
                    LocationEvent::Error(message) => {
                        tracing::warn!(error = %message, "Location provider error");
                        session.record_location_error(message);
                    }
                }
            }
        });
        self.subscriptions.push(Subscription::new("location", locator));
    }

    fn cancel_subscriptions(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
    }
}
