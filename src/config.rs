// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::db::{check_slot_name, slots};
use std::env;
use std::path::PathBuf;

/// Zoom level the map uses when jumping to a workout.
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory holding the slot files
    pub data_dir: PathBuf,
    /// Slot name for the workout collection
    pub storage_slot: String,
    /// Zoom level for map navigation
    pub map_zoom_level: u8,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let storage_slot =
            env::var("STORAGE_SLOT").unwrap_or_else(|_| slots::WORKOUTS.to_string());
        check_slot_name(&storage_slot).map_err(|_| ConfigError::Invalid {
            name: "STORAGE_SLOT",
            value: storage_slot.clone(),
        })?;

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            storage_slot,
            map_zoom_level: parse_var("MAP_ZOOM_LEVEL", DEFAULT_MAP_ZOOM)?,
        })
    }

    /// Deterministic config for tests.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: PathBuf::from("data"),
            storage_slot: slots::WORKOUTS.to_string(),
            map_zoom_level: DEFAULT_MAP_ZOOM,
        }
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
