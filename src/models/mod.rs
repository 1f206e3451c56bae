// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod legacy;
pub mod view;
pub mod workout;

pub use legacy::{LegacyError, LegacyWorkout};
pub use view::{ListEntryView, MapView, MarkerView};
pub use workout::{Coords, NewWorkout, ValidationError, Workout, WorkoutKind, WorkoutMetrics};
