// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation data handed to the front end: map markers, list rows, and
//! map navigation targets.

use crate::models::workout::{Coords, Workout, WorkoutKind, WorkoutMetrics};
use crate::time_utils::format_utc_rfc3339;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

/// Map marker with its popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerView {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coords: Coords,
    /// CSS class for the popup, e.g. "running-popup"
    pub popup_class: String,
    /// Popup text, e.g. "🏃‍♂️ Running on July 14"
    pub content: String,
}

impl From<&Workout> for MarkerView {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            id: workout.id.clone(),
            coords: workout.coords,
            popup_class: format!("{}-popup", kind),
            content: format!("{} {}", icon(kind), workout.description),
        }
    }
}

/// One row of the workout list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListEntryView {
    /// Correlates the row with the stored workout
    pub id: String,
    pub kind: WorkoutKind,
    pub title: String,
    pub icon: String,
    pub created_at: String,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Pace or speed, one decimal
    pub metric_value: String,
    pub metric_unit: String,
    /// Cadence or elevation gain
    pub extra_value: f64,
    pub extra_unit: String,
}

impl From<&Workout> for ListEntryView {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        let (metric, metric_unit, extra_value, extra_unit) = match workout.metrics {
            WorkoutMetrics::Running {
                cadence_spm,
                pace_min_per_km,
            } => (pace_min_per_km, "min/km", cadence_spm, "spm"),
            WorkoutMetrics::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => (speed_km_per_h, "km/h", elevation_gain_m, "m"),
        };

        Self {
            id: workout.id.clone(),
            kind,
            title: workout.description.clone(),
            icon: icon(kind).to_string(),
            created_at: format_utc_rfc3339(workout.created_at),
            distance_km: workout.distance_km,
            duration_min: workout.duration_min,
            metric_value: format!("{:.1}", metric),
            metric_unit: metric_unit.to_string(),
            extra_value,
            extra_unit: extra_unit.to_string(),
        }
    }
}

/// Where the map should move to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapView {
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub center: Coords,
    pub zoom: u8,
}

/// Build a GeoJSON FeatureCollection of point features, one per marker.
pub fn markers_geojson(markers: &[MarkerView]) -> FeatureCollection {
    let features = markers
        .iter()
        .map(|marker| {
            let point: geo::Point<f64> = marker.coords.into();

            let mut properties = JsonObject::new();
            properties.insert("id".to_string(), marker.id.clone().into());
            properties.insert("popup_class".to_string(), marker.popup_class.clone().into());
            properties.insert("content".to_string(), marker.content.clone().into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_run() -> Workout {
        let date = Utc.with_ymd_and_hms(2024, 7, 14, 9, 30, 0).unwrap();
        Workout::running(Coords::new(38.72, -9.14), 5.2, 24.0, 178.0, date).unwrap()
    }

    #[test]
    fn test_marker_popup() {
        let marker = MarkerView::from(&sample_run());
        assert_eq!(marker.popup_class, "running-popup");
        assert_eq!(marker.content, "🏃‍♂️ Running on July 14");
    }

    #[test]
    fn test_list_entry_rounds_metric() {
        let entry = ListEntryView::from(&sample_run());
        // 24 / 5.2 = 4.615...
        assert_eq!(entry.metric_value, "4.6");
        assert_eq!(entry.metric_unit, "min/km");
        assert_eq!(entry.extra_value, 178.0);
        assert_eq!(entry.extra_unit, "spm");
        assert_eq!(entry.created_at, "2024-07-14T09:30:00Z");
    }

    #[test]
    fn test_geojson_uses_lng_lat_order() {
        let workout = sample_run();
        let collection = markers_geojson(&[MarkerView::from(&workout)]);
        let value = serde_json::to_value(&collection).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        let feature = &value["features"][0];
        assert_eq!(
            feature["geometry"]["coordinates"],
            serde_json::json!([-9.14, 38.72])
        );
        assert_eq!(feature["properties"]["id"], workout.id.as_str());
    }
}
