// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker: record runs and rides picked on a map.
//!
//! This crate provides the backend API that owns the workout collection,
//! validates new workouts, and persists the collection between sessions.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::WorkoutStore;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The session's workouts; every handler goes through this lock.
    pub store: Mutex<WorkoutStore>,
}

impl AppState {
    pub fn new(config: Config, store: WorkoutStore) -> Self {
        Self {
            config,
            store: Mutex::new(store),
        }
    }
}
