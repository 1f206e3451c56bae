// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer: named key-value slots.
//!
//! A slot holds one complete snapshot. Writes replace the whole value;
//! there are no partial updates.

pub mod file;
pub mod memory;

pub use file::FileSlotStorage;
pub use memory::MemorySlotStorage;

/// Slot names as constants.
pub mod slots {
    /// The serialized workout collection
    pub const WORKOUTS: &str = "workouts";
}

/// Key-value storage of whole snapshots.
pub trait SlotStorage: Send {
    /// Read a slot. Returns `None` when the slot has never been written.
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace the slot contents atomically.
    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the slot. Removing a missing slot is not an error.
    fn remove(&mut self, slot: &str) -> Result<(), StorageError>;
}

/// Errors from slot storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid slot name: {0:?}")]
    InvalidSlot(String),

    #[error("I/O error on slot {slot}: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Slot names become file names, so keep them to a safe alphabet.
pub fn check_slot_name(slot: &str) -> Result<(), StorageError> {
    let valid = !slot.is_empty()
        && slot.len() <= 64
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidSlot(slot.to_string()))
    }
}
