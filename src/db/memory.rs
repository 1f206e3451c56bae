// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory slot storage for tests and offline runs.

use crate::db::{check_slot_name, SlotStorage, StorageError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Slot storage kept in memory.
///
/// Clones share the same slots, so a test can hand one clone to a store and
/// inspect or reuse the data through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes and removals fail (simulates a full disk).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("writes disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        check_slot_name(slot)?;
        Ok(self.lock().get(slot).cloned())
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        check_slot_name(slot)?;
        self.check_writable()?;
        self.lock().insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        check_slot_name(slot)?;
        self.check_writable()?;
        self.lock().remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let storage = MemorySlotStorage::new();
        let mut writer = storage.clone();

        writer.write("workouts", "[]").unwrap();
        assert_eq!(storage.read("workouts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_failing_writes_leave_data() {
        let mut storage = MemorySlotStorage::new();
        storage.write("workouts", "[]").unwrap();

        storage.set_fail_writes(true);
        assert!(storage.write("workouts", "[1]").is_err());
        assert!(storage.remove("workouts").is_err());
        assert_eq!(storage.read("workouts").unwrap().as_deref(), Some("[]"));
    }
}
