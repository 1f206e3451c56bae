// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Render notifications towards the front end.

use crate::models::{ListEntryView, MapView, MarkerView, Workout};

/// Receiver of render notifications from the workout store.
pub trait RenderSink {
    /// Put a marker for the workout on the map.
    fn render_marker(&mut self, workout: &Workout);

    /// Add the workout to the list.
    fn render_list_entry(&mut self, workout: &Workout);

    /// Move the map to a workout.
    fn navigate_to(&mut self, _view: MapView) {}
}

/// Collects render notifications so a handler can return them in one response.
#[derive(Debug, Default)]
pub struct RenderBatch {
    pub markers: Vec<MarkerView>,
    pub list_entries: Vec<ListEntryView>,
    pub view: Option<MapView>,
}

impl RenderSink for RenderBatch {
    fn render_marker(&mut self, workout: &Workout) {
        self.markers.push(MarkerView::from(workout));
    }

    fn render_list_entry(&mut self, workout: &Workout) {
        self.list_entries.push(ListEntryView::from(workout));
    }

    fn navigate_to(&mut self, view: MapView) {
        self.view = Some(view);
    }
}
