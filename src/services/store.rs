// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout store: owns the session's workout collection.
//!
//! The store is the validation boundary for new workouts and the only
//! writer of the persisted slot. Every change rewrites the whole
//! collection snapshot:
//! 1. Validate the input and build the workout
//! 2. Append it to the collection
//! 3. Persist the full collection (rolled back if the write fails)
//! 4. Notify the render sink (marker, then list entry)

use crate::db::{SlotStorage, StorageError};
use crate::models::{LegacyWorkout, MapView, NewWorkout, ValidationError, Workout};
use crate::services::render::RenderSink;
use chrono::Utc;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode workouts: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode workouts: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The ordered workout collection and its persisted slot.
pub struct WorkoutStore {
    storage: Box<dyn SlotStorage>,
    slot: String,
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    /// Create an empty store bound to `slot`. Nothing is read yet.
    pub fn new(storage: Box<dyn SlotStorage>, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
            workouts: Vec::new(),
        }
    }

    /// Create a store and load whatever the slot holds.
    pub fn open(storage: Box<dyn SlotStorage>, slot: impl Into<String>) -> Self {
        let mut store = Self::new(storage, slot);
        store.load();
        store
    }

    /// Load the collection from the slot.
    ///
    /// A missing, unreadable, or malformed slot yields an empty collection;
    /// this never fails. Returns the number of workouts loaded.
    pub fn load(&mut self) -> usize {
        let data = match self.storage.read(&self.slot) {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(slot = %self.slot, "No saved workouts");
                self.workouts.clear();
                return 0;
            }
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "Failed to read saved workouts");
                self.workouts.clear();
                return 0;
            }
        };

        match self.restore(&data) {
            Ok(count) => {
                tracing::info!(slot = %self.slot, count, "Restored workouts");
                count
            }
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "Discarding unreadable saved workouts");
                self.workouts.clear();
                0
            }
        }
    }

    /// Validate, create, store, and render a new workout.
    ///
    /// On validation failure nothing changes and nothing is rendered.
    pub fn add_workout(
        &mut self,
        input: NewWorkout,
        sink: &mut dyn RenderSink,
    ) -> Result<&Workout, StoreError> {
        let kind = input.kind;
        let workout = match input.build(Utc::now()) {
            Ok(workout) => workout,
            Err(e) => {
                tracing::info!(kind = %kind, error = %e, "Rejected workout input");
                return Err(e.into());
            }
        };
        self.workouts.push(workout);

        if let Err(e) = self.persist() {
            self.workouts.pop();
            tracing::error!(slot = %self.slot, error = %e, "Failed to save new workout");
            return Err(e);
        }

        let index = self.workouts.len() - 1;
        let workout = &self.workouts[index];
        tracing::info!(
            workout_id = %workout.id,
            kind = %workout.kind(),
            total = self.workouts.len(),
            "Workout added"
        );

        sink.render_marker(workout);
        sink.render_list_entry(workout);
        Ok(workout)
    }

    /// Find a workout by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Move the map to a workout picked from the list.
    ///
    /// An unknown id is a no-op.
    pub fn focus(&self, id: &str, zoom: u8, sink: &mut dyn RenderSink) -> Option<&Workout> {
        let workout = self.find_by_id(id)?;
        sink.navigate_to(MapView {
            center: workout.coords,
            zoom,
        });
        Some(workout)
    }

    /// Mark a workout as activated and save the new count.
    ///
    /// Returns `Ok(None)` for an unknown id.
    pub fn activate(&mut self, id: &str) -> Result<Option<u32>, StoreError> {
        let Some(index) = self.workouts.iter().position(|w| w.id == id) else {
            return Ok(None);
        };

        let previous = self.workouts[index].interaction_count;
        let count = self.workouts[index].activate();
        if let Err(e) = self.persist() {
            self.workouts[index].interaction_count = previous;
            return Err(e);
        }

        tracing::debug!(workout_id = id, count, "Workout activated");
        Ok(Some(count))
    }

    /// Encode the collection as a JSON array of flat records.
    pub fn serialize(&self) -> Result<String, StoreError> {
        serde_json::to_string(&self.workouts).map_err(StoreError::Encode)
    }

    /// Replace the collection with a serialized one.
    ///
    /// Accepts the current record layout and, failing that, the layout of
    /// the browser-only build. Legacy records that cannot be converted are
    /// skipped. On error the collection is left unchanged.
    pub fn restore(&mut self, data: &str) -> Result<usize, StoreError> {
        let workouts = match serde_json::from_str::<Vec<Workout>>(data) {
            Ok(workouts) => workouts,
            Err(err) => {
                let legacy: Vec<LegacyWorkout> =
                    serde_json::from_str(data).map_err(|_| StoreError::Decode(err))?;
                tracing::info!(count = legacy.len(), "Importing legacy workout records");
                legacy
                    .into_iter()
                    .filter_map(|record| match record.into_workout() {
                        Ok(workout) => Some(workout),
                        Err(e) => {
                            tracing::warn!(error = %e, "Skipping legacy workout record");
                            None
                        }
                    })
                    .collect()
            }
        };

        self.workouts = workouts;
        Ok(self.workouts.len())
    }

    /// Render a list entry for every workout, oldest first.
    ///
    /// Markers are not replayed here: at startup the map may not exist yet.
    pub fn replay_list(&self, sink: &mut dyn RenderSink) {
        for workout in &self.workouts {
            sink.render_list_entry(workout);
        }
    }

    /// Render a marker for every workout once the map is ready.
    pub fn replay_markers(&self, sink: &mut dyn RenderSink) {
        for workout in &self.workouts {
            sink.render_marker(workout);
        }
    }

    /// Drop every workout, in memory and in the slot.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.storage.remove(&self.slot)?;
        let count = self.workouts.len();
        self.workouts.clear();

        tracing::info!(slot = %self.slot, count, "Cleared all workouts");
        Ok(())
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let data = self.serialize()?;
        self.storage.write(&self.slot, &data)?;
        Ok(())
    }
}
