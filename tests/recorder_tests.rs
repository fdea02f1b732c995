// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recorder wiring: subscriptions, cancellation and workout mode.

use stride_tracker::config::Config;
use stride_tracker::error::TrackerError;
use stride_tracker::models::{LocationSample, Sport};
use stride_tracker::services::providers::LocationEvent;
use stride_tracker::services::{SessionStatus, StartMode};

mod common;
use common::{harness, harness_with_config, north_km, push_day, settle, wait_for};

#[tokio::test]
async fn test_ticks_and_samples_accumulate_while_tracking() {
    let mut h = harness(None);
    assert_eq!(h.recorder.start().await.unwrap(), StartMode::Fresh);
    assert_eq!(h.recorder.active_subscriptions(), 2);

    h.location
        .sample(LocationSample::new(0.0, 0.0, Some(50.0)))
        .await;
    h.clock.advance(5).await;
    h.location
        .sample(LocationSample::new(north_km(0.25), 0.0, Some(52.0)))
        .await;

    let snapshot = wait_for(&h.recorder, |s| {
        s.metrics.elapsed_seconds == 5 && s.path.len() == 2
    })
    .await;

    assert!((snapshot.metrics.distance_km - 0.25).abs() < 1e-9);
    assert_eq!(snapshot.metrics.elevation_gain_meters, 2.0);
    assert!(snapshot.pace_seconds_per_km.is_some());
}

#[tokio::test]
async fn test_pause_stops_both_producers() {
    let mut h = harness(None);
    h.recorder.start().await.unwrap();
    h.location.sample(LocationSample::new(0.0, 0.0, None)).await;
    h.clock.advance(3).await;
    let frozen = wait_for(&h.recorder, |s| {
        s.metrics.elapsed_seconds == 3 && s.path.len() == 1
    })
    .await;

    h.recorder.pause().await.unwrap();
    assert_eq!(h.recorder.active_subscriptions(), 0);

    // Anything sent after pause must not reach the session.
    h.clock.advance(10).await;
    h.location
        .sample(LocationSample::new(north_km(1.0), 0.0, None))
        .await;
    settle().await;

    let snapshot = h.recorder.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Paused);
    assert_eq!(snapshot.metrics, frozen.metrics);
    assert_eq!(snapshot.path, frozen.path);
}

#[tokio::test]
async fn test_resume_continues_without_reset() {
    let mut h = harness(None);
    h.recorder.start().await.unwrap();
    h.location.sample(LocationSample::new(0.0, 0.0, None)).await;
    h.clock.advance(2).await;
    wait_for(&h.recorder, |s| s.metrics.elapsed_seconds == 2).await;

    h.recorder.pause().await.unwrap();
    assert_eq!(h.recorder.start().await.unwrap(), StartMode::Resumed);
    assert_eq!(h.location.subscription_count(), 2);

    h.clock.advance(2).await;
    h.location
        .sample(LocationSample::new(north_km(0.5), 0.0, None))
        .await;
    let snapshot = wait_for(&h.recorder, |s| {
        s.metrics.elapsed_seconds == 4 && s.path.len() == 2
    })
    .await;
    assert!((snapshot.metrics.distance_km - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_resume_requires_paused() {
    let mut h = harness(None);
    assert!(matches!(
        h.recorder.resume().await,
        Err(TrackerError::InvalidTransition { .. })
    ));
    h.recorder.start().await.unwrap();
    h.recorder.pause().await.unwrap();
    assert_eq!(h.recorder.resume().await.unwrap(), StartMode::Resumed);
    assert_eq!(h.recorder.active_subscriptions(), 2);
}

#[tokio::test]
async fn test_discard_resets_for_next_start() {
    let mut h = harness(None);
    h.recorder.start().await.unwrap();
    h.location.sample(LocationSample::new(0.0, 0.0, None)).await;
    h.location
        .sample(LocationSample::new(north_km(0.1), 0.0, None))
        .await;
    h.clock.advance(4).await;
    wait_for(&h.recorder, |s| s.path.len() == 2 && s.metrics.elapsed_seconds == 4).await;

    h.recorder.discard().await;
    assert_eq!(h.recorder.active_subscriptions(), 0);
    let idle = h.recorder.snapshot().await;
    assert_eq!(idle.status, SessionStatus::Idle);
    assert!(idle.path.is_empty());
    assert_eq!(idle.metrics.elapsed_seconds, 0);

    assert_eq!(h.recorder.start().await.unwrap(), StartMode::Fresh);
    let fresh = h.recorder.snapshot().await;
    assert_eq!(fresh.metrics.distance_km, 0.0);
    assert_eq!(fresh.metrics.elapsed_seconds, 0);
    assert!(fresh.path.is_empty());
}

#[tokio::test]
async fn test_location_error_is_recoverable() {
    let mut h = harness(None);
    h.recorder.start().await.unwrap();
    h.location
        .send(LocationEvent::Error("permission denied".to_string()))
        .await;

    let snapshot = wait_for(&h.recorder, |s| s.last_error.is_some()).await;
    assert_eq!(snapshot.status, SessionStatus::Tracking);
    assert_eq!(snapshot.last_error.as_deref(), Some("permission denied"));

    // Retrying start resubscribes without resetting.
    assert_eq!(h.recorder.start().await.unwrap(), StartMode::Resumed);
    assert_eq!(h.location.subscription_count(), 2);
    assert_eq!(h.recorder.active_subscriptions(), 2);
    assert!(h.recorder.snapshot().await.last_error.is_none());

    h.location
        .send(LocationEvent::Error("timeout".to_string()))
        .await;
    wait_for(&h.recorder, |s| s.last_error.is_some()).await;
    h.recorder.dismiss_error().await;
    assert!(h.recorder.snapshot().await.last_error.is_none());
}

#[tokio::test]
async fn test_workout_start_refused_without_routine() {
    let mut h = harness(None);
    h.recorder
        .select_sport(Sport::ResistanceTraining)
        .await
        .unwrap();

    let err = h.recorder.start().await.unwrap_err();
    assert!(matches!(err, TrackerError::NoWorkoutToday));
    assert!(!err.user_message().is_empty());

    let snapshot = h.recorder.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Idle);
    assert_eq!(snapshot.sport, Sport::default());
    assert_eq!(h.recorder.active_subscriptions(), 0);
    assert_eq!(h.location.subscription_count(), 0);
}

#[tokio::test]
async fn test_workout_mode_runs_checklist_without_location() {
    let mut h = harness(Some(push_day()));
    h.recorder
        .select_sport(Sport::ResistanceTraining)
        .await
        .unwrap();
    h.recorder.start().await.unwrap();

    assert_eq!(h.recorder.active_subscriptions(), 1);
    assert_eq!(h.location.subscription_count(), 0);

    assert!(h.recorder.toggle_exercise("bench").await.unwrap());
    assert!(h.recorder.toggle_exercise("dips").await.unwrap());
    assert!(!h.recorder.toggle_exercise("dips").await.unwrap());

    h.clock.advance(20 * 60).await;
    wait_for(&h.recorder, |s| s.metrics.elapsed_seconds == 20 * 60).await;

    let activity = h.recorder.finish().await.unwrap();
    assert_eq!(activity.sport, Sport::ResistanceTraining);
    assert_eq!(
        activity.title.as_deref(),
        Some("Resistance Training — Day 1")
    );
    assert_eq!(activity.distance_km, 0.0);
    assert_eq!(activity.pace_seconds_per_km, None);
    assert_eq!(activity.calories, Some(120.0));
    assert_eq!(activity.map_image_url, None);
    let summary = activity.workout.unwrap();
    assert_eq!(summary.completed_exercise_ids, vec!["bench".to_string()]);
    assert_eq!(summary.total_exercises, 2);
}

#[tokio::test]
async fn test_sport_locked_while_recording() {
    let mut h = harness(None);
    h.recorder.start().await.unwrap();
    assert!(matches!(
        h.recorder.select_sport(Sport::Cycling).await,
        Err(TrackerError::SportLocked)
    ));
}

#[tokio::test]
async fn test_finish_single_point_has_no_map() {
    let mut h = harness(None);
    h.recorder.start().await.unwrap();
    h.location.sample(LocationSample::new(0.0, 0.0, None)).await;
    wait_for(&h.recorder, |s| s.path.len() == 1).await;

    let activity = h.recorder.finish().await.unwrap();
    assert_eq!(activity.map_image_url, None);
    assert_eq!(h.recorder.status().await, SessionStatus::Finished);
    assert_eq!(h.recorder.active_subscriptions(), 0);

    // Finished is terminal until the session returns to idle.
    assert!(h.recorder.finish().await.is_err());
    assert!(h.recorder.start().await.is_err());
    h.recorder.discard().await;
    assert_eq!(h.recorder.start().await.unwrap(), StartMode::Fresh);
}

#[tokio::test]
async fn test_finish_completes_when_map_service_is_unreachable() {
    let config = Config {
        map_base_url: "http://127.0.0.1:1".to_string(),
        map_verify: true,
        ..Config::default()
    };
    let mut h = harness_with_config(&config, None);
    h.recorder.start().await.unwrap();
    h.location.sample(LocationSample::new(0.0, 0.0, None)).await;
    h.location
        .sample(LocationSample::new(north_km(0.5), 0.0, None))
        .await;
    wait_for(&h.recorder, |s| s.path.len() == 2).await;

    let activity = h.recorder.finish().await.unwrap();
    assert_eq!(activity.map_image_url, None);
    assert!((activity.distance_km - 0.5).abs() < 1e-9);
    assert_eq!(h.recorder.status().await, SessionStatus::Finished);
}

#[tokio::test]
async fn test_dropping_recorder_cancels_subscriptions() {
    let mut h = harness(None);
    h.recorder.start().await.unwrap();
    assert!(h.clock.tick().await);

    drop(h.recorder);
    settle().await;

    assert!(!h.clock.tick().await);
    assert!(
        !h.location
            .sample(LocationSample::new(0.0, 0.0, None))
            .await
    );
}
