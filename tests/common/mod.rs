// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stride_tracker::config::Config;
use stride_tracker::geodesy::EARTH_RADIUS_KM;
use stride_tracker::models::{DailyWorkout, Exercise, LocationSample};
use stride_tracker::services::providers::{
    Clock, LocationEvent, LocationProvider, RoutineStore, LOCATION_CHANNEL_CAPACITY,
};
use stride_tracker::services::{SessionRecorder, SessionSnapshot};
use tokio::sync::mpsc;

/// Location provider driven by the test through a channel.
#[allow(dead_code)]
#[derive(Default)]
pub struct ChannelLocationProvider {
    sender: Mutex<Option<mpsc::Sender<LocationEvent>>>,
    subscriptions: Mutex<usize>,
}

#[allow(dead_code)]
impl ChannelLocationProvider {
    pub async fn send(&self, event: LocationEvent) -> bool {
        let sender = self.sender.lock().unwrap().clone();
        match sender {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }

    pub async fn sample(&self, sample: LocationSample) -> bool {
        self.send(LocationEvent::Sample(sample)).await
    }

    pub fn subscription_count(&self) -> usize {
        *self.subscriptions.lock().unwrap()
    }
}

impl LocationProvider for ChannelLocationProvider {
    fn subscribe(&self) -> mpsc::Receiver<LocationEvent> {
        let (tx, rx) = mpsc::channel(LOCATION_CHANNEL_CAPACITY);
        *self.sender.lock().unwrap() = Some(tx);
        *self.subscriptions.lock().unwrap() += 1;
        rx
    }
}

/// Clock that only ticks when the test says so.
#[allow(dead_code)]
#[derive(Default)]
pub struct ManualClock {
    sender: Mutex<Option<mpsc::Sender<()>>>,
}

#[allow(dead_code)]
impl ManualClock {
    pub async fn tick(&self) -> bool {
        let sender = self.sender.lock().unwrap().clone();
        match sender {
            Some(tx) => tx.send(()).await.is_ok(),
            None => false,
        }
    }

    pub async fn advance(&self, seconds: u64) {
        for _ in 0..seconds {
            self.tick().await;
        }
    }
}

impl Clock for ManualClock {
    fn subscribe(&self) -> mpsc::Receiver<()> {
        let (tx, rx) = mpsc::channel(16);
        *self.sender.lock().unwrap() = Some(tx);
        rx
    }
}

/// Routine store returning the same workout every day.
#[allow(dead_code)]
pub struct FixedRoutine(pub Option<DailyWorkout>);

impl RoutineStore for FixedRoutine {
    fn workout_for(&self, _date: NaiveDate) -> Option<DailyWorkout> {
        self.0.clone()
    }
}

#[allow(dead_code)]
pub fn push_day() -> DailyWorkout {
    DailyWorkout {
        day_number: 1,
        focus: Some("Push".to_string()),
        exercises: vec![
            Exercise {
                id: "bench".to_string(),
                name: "Bench Press".to_string(),
                sets: 4,
                reps: 6,
                weight_kg: Some(80.0),
            },
            Exercise {
                id: "dips".to_string(),
                name: "Dips".to_string(),
                sets: 3,
                reps: 10,
                weight_kg: None,
            },
        ],
    }
}

/// Latitude offset (degrees) for moving `km` due north along a meridian.
#[allow(dead_code)]
pub fn north_km(km: f64) -> f64 {
    (km / EARTH_RADIUS_KM).to_degrees()
}

#[allow(dead_code)]
pub struct Harness {
    pub recorder: SessionRecorder,
    pub location: Arc<ChannelLocationProvider>,
    pub clock: Arc<ManualClock>,
}

#[allow(dead_code)]
pub fn harness(workout: Option<DailyWorkout>) -> Harness {
    harness_with_config(&Config::default(), workout)
}

#[allow(dead_code)]
pub fn harness_with_config(config: &Config, workout: Option<DailyWorkout>) -> Harness {
    let location = Arc::new(ChannelLocationProvider::default());
    let clock = Arc::new(ManualClock::default());
    let recorder = SessionRecorder::new(
        config,
        location.clone(),
        clock.clone(),
        Arc::new(FixedRoutine(workout)),
    );
    Harness {
        recorder,
        location,
        clock,
    }
}

/// Poll the recorder until `pred` holds, failing after a short timeout.
#[allow(dead_code)]
pub async fn wait_for<F>(recorder: &SessionRecorder, pred: F) -> SessionSnapshot
where
    F: Fn(&SessionSnapshot) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let snapshot = recorder.snapshot().await;
        if pred(&snapshot) {
            return snapshot;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached, last snapshot: {:?}",
            snapshot
        );
        tokio::task::yield_now().await;
    }
}

/// Give spawned consumer tasks a chance to drain their channels.
#[allow(dead_code)]
pub async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}
