// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Import of workout records saved by the earlier browser-only build.
//!
//! That build stored `{date, id, clicks, coords, distance, duration, type,
//! cadence|elevationGain, pace|speed, description}` per workout. Records
//! without a `type` are told apart by which variant field is present.

use crate::models::workout::{describe, Coords, Workout, WorkoutKind, WorkoutMetrics};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Workout record in the browser-only layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyWorkout {
    pub date: DateTime<Utc>,
    pub id: String,
    #[serde(default)]
    pub clicks: u32,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: Option<WorkoutKind>,
    pub cadence: Option<f64>,
    pub pace: Option<f64>,
    pub elevation_gain: Option<f64>,
    pub speed: Option<f64>,
    pub description: Option<String>,
}

/// A legacy record that cannot be converted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LegacyError {
    #[error("Cannot tell the workout kind of record {0}")]
    UnknownKind(String),

    #[error("Record {id} is missing {field}")]
    MissingField { id: String, field: &'static str },
}

impl LegacyWorkout {
    fn resolve_kind(&self) -> Result<WorkoutKind, LegacyError> {
        if let Some(kind) = self.kind {
            return Ok(kind);
        }
        match (self.cadence, self.elevation_gain) {
            (Some(_), None) => Ok(WorkoutKind::Running),
            (None, Some(_)) => Ok(WorkoutKind::Cycling),
            _ => Err(LegacyError::UnknownKind(self.id.clone())),
        }
    }

    /// Convert into a workout, keeping the stored id, date, and derived values.
    ///
    /// Derived values missing from the record are computed from the inputs.
    pub fn into_workout(self) -> Result<Workout, LegacyError> {
        let kind = self.resolve_kind()?;

        let metrics = match kind {
            WorkoutKind::Running => {
                let cadence_spm = self.cadence.ok_or_else(|| LegacyError::MissingField {
                    id: self.id.clone(),
                    field: "cadence",
                })?;
                WorkoutMetrics::Running {
                    cadence_spm,
                    pace_min_per_km: self.pace.unwrap_or(self.duration / self.distance),
                }
            }
            WorkoutKind::Cycling => {
                let elevation_gain_m =
                    self.elevation_gain
                        .ok_or_else(|| LegacyError::MissingField {
                            id: self.id.clone(),
                            field: "elevationGain",
                        })?;
                WorkoutMetrics::Cycling {
                    elevation_gain_m,
                    speed_km_per_h: self
                        .speed
                        .unwrap_or(self.distance / (self.duration / 60.0)),
                }
            }
        };

        Ok(Workout {
            description: self
                .description
                .unwrap_or_else(|| describe(kind, self.date)),
            id: self.id,
            created_at: self.date,
            coords: self.coords,
            distance_km: self.distance,
            duration_min: self.duration,
            metrics,
            interaction_count: self.clicks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LegacyWorkout {
        serde_json::from_str(json).expect("legacy record should parse")
    }

    #[test]
    fn test_typed_running_record() {
        let record = parse(
            r#"{"date":"2024-07-14T09:30:00.000Z","id":"1720949400","clicks":2,
                "coords":[38.72,-9.14],"distance":5.2,"duration":24,"type":"running",
                "cadence":178,"pace":4.615,"description":"Running on July 14"}"#,
        );

        let workout = record.into_workout().unwrap();
        assert_eq!(workout.id, "1720949400");
        assert_eq!(workout.kind(), WorkoutKind::Running);
        assert_eq!(workout.interaction_count, 2);
        assert_eq!(workout.description, "Running on July 14");
        assert_eq!(
            workout.metrics,
            WorkoutMetrics::Running {
                cadence_spm: 178.0,
                pace_min_per_km: 4.615
            }
        );
    }

    #[test]
    fn test_untyped_record_inferred_from_fields() {
        let record = parse(
            r#"{"date":"2024-03-03T12:00:00Z","id":"1709467200",
                "coords":[39.0,-12.0],"distance":27,"duration":90,"elevationGain":523}"#,
        );

        let workout = record.into_workout().unwrap();
        assert_eq!(workout.kind(), WorkoutKind::Cycling);
        assert_eq!(workout.description, "Cycling on March 3");
        assert_eq!(
            workout.metrics,
            WorkoutMetrics::Cycling {
                elevation_gain_m: 523.0,
                speed_km_per_h: 18.0
            }
        );
    }

    #[test]
    fn test_ambiguous_record_rejected() {
        let record = parse(
            r#"{"date":"2024-03-03T12:00:00Z","id":"42",
                "coords":[39.0,-12.0],"distance":27,"duration":90}"#,
        );

        assert_eq!(
            record.into_workout().unwrap_err(),
            LegacyError::UnknownKind("42".to_string())
        );
    }
}
