// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: the two workout variants and their derived metrics.
//!
//! A workout is immutable after construction except for its
//! `interaction_count`. The description and the variant's derived metric
//! (pace or speed) are computed once in the constructor and stored, so a
//! restored workout carries exactly the values it was created with.

use crate::time_utils::month_day;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Geographic point picked on the map.
///
/// Persisted as a `[lat, lng]` pair, the same shape the map library uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check the point is a real position on the globe.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(ValidationError::Coordinates {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

/// GeoJSON and `geo` use x = longitude, y = latitude.
impl From<Coords> for geo::Point<f64> {
    fn from(coords: Coords) -> Self {
        geo::Point::new(coords.lng, coords.lat)
    }
}

/// Workout variant discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase name as stored and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific attribute and derived metric.
///
/// Serialized with an explicit `kind` tag and flattened into the workout
/// record, so each persisted entry names its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkoutMetrics {
    Running {
        /// Steps per minute
        cadence_spm: f64,
        /// Minutes per kilometer
        pace_min_per_km: f64,
    },
    Cycling {
        /// Meters climbed
        elevation_gain_m: f64,
        /// Kilometers per hour
        speed_km_per_h: f64,
    },
}

impl WorkoutMetrics {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutMetrics::Running { .. } => WorkoutKind::Running,
            WorkoutMetrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Numeric preconditions failed for a new workout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Inputs have to be positive numbers!")]
    NotPositive,

    #[error("Coordinates out of range: [{lat}, {lng}]")]
    Coordinates { lat: f64, lng: f64 },
}

/// Raw form submission for a new workout.
///
/// `extra` is the kind-specific input: cadence for running, elevation gain
/// for cycling. Missing form values are represented as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewWorkout {
    pub kind: WorkoutKind,
    pub coords: Coords,
    pub distance_km: f64,
    pub duration_min: f64,
    pub extra: f64,
}

impl NewWorkout {
    /// All numeric inputs must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.coords.validate()?;

        let inputs = [self.distance_km, self.duration_min, self.extra];
        if inputs.iter().all(|v| v.is_finite() && *v > 0.0) {
            Ok(())
        } else {
            Err(ValidationError::NotPositive)
        }
    }

    /// Construct the matching variant.
    pub fn build(self, created_at: DateTime<Utc>) -> Result<Workout, ValidationError> {
        match self.kind {
            WorkoutKind::Running => Workout::running(
                self.coords,
                self.distance_km,
                self.duration_min,
                self.extra,
                created_at,
            ),
            WorkoutKind::Cycling => Workout::cycling(
                self.coords,
                self.distance_km,
                self.duration_min,
                self.extra,
                created_at,
            ),
        }
    }
}

/// A single recorded workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Opaque unique identifier (UUID v4 for new workouts)
    pub id: String,
    /// When the workout was recorded
    pub created_at: DateTime<Utc>,
    /// Where the workout was recorded
    pub coords: Coords,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(flatten)]
    pub metrics: WorkoutMetrics,
    /// e.g. "Running on July 14"
    pub description: String,
    /// Number of times the workout was activated from the list
    #[serde(default)]
    pub interaction_count: u32,
}

/// Pace and speed must stay representable in the saved JSON, which has no
/// encoding for infinity or NaN.
fn derived(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive)
    }
}

impl Workout {
    /// Create a running workout; pace is duration over distance.
    pub fn running(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        NewWorkout {
            kind: WorkoutKind::Running,
            coords,
            distance_km,
            duration_min,
            extra: cadence_spm,
        }
        .validate()?;

        let pace_min_per_km = derived(duration_min / distance_km)?;
        let metrics = WorkoutMetrics::Running {
            cadence_spm,
            pace_min_per_km,
        };
        Ok(Self::assemble(
            coords,
            distance_km,
            duration_min,
            metrics,
            created_at,
        ))
    }

    /// Create a cycling workout; speed is distance over duration in hours.
    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        NewWorkout {
            kind: WorkoutKind::Cycling,
            coords,
            distance_km,
            duration_min,
            extra: elevation_gain_m,
        }
        .validate()?;

        let speed_km_per_h = derived(distance_km / (duration_min / 60.0))?;
        let metrics = WorkoutMetrics::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        };
        Ok(Self::assemble(
            coords,
            distance_km,
            duration_min,
            metrics,
            created_at,
        ))
    }

    fn assemble(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        metrics: WorkoutMetrics,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_workout_id(),
            created_at,
            coords,
            distance_km,
            duration_min,
            description: describe(metrics.kind(), created_at),
            metrics,
            interaction_count: 0,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        self.metrics.kind()
    }

    /// Record one activation; returns the new count.
    pub fn activate(&mut self) -> u32 {
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.interaction_count
    }
}

/// Human-readable description, e.g. "Cycling on March 3".
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), month_day(created_at))
}

/// Generate a fresh workout identifier.
pub fn new_workout_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
