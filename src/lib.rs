// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Stride tracker: live activity recording and competition scoring.
//!
//! This crate turns a stream of location samples into distance, pace and
//! elevation for a recording session, finalizes the session into a recorded
//! activity with a static route map, and scores that activity against the
//! user's active competitions.

pub mod config;
pub mod error;
pub mod geodesy;
pub mod logging;
pub mod models;
pub mod services;
pub mod time_utils;
