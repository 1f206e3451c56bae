// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed slot storage: one JSON file per slot under a data directory.

use crate::db::{check_slot_name, SlotStorage, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Slot storage in a local directory.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    /// Open (and create if needed) the data directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            slot: dir.display().to_string(),
            source,
        })?;

        tracing::info!(dir = %dir.display(), "Opened slot storage");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        check_slot_name(slot)?;
        Ok(self.dir.join(format!("{}.json", slot)))
    }
}

fn io_error(slot: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        slot: slot.to_string(),
        source,
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(slot)(e)),
        }
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        // Write beside the target then rename, so readers never see a torn file
        let tmp = self.dir.join(format!(".{}.json.tmp", slot));
        fs::write(&tmp, value).map_err(io_error(slot))?;
        fs::rename(&tmp, &path).map_err(io_error(slot))?;

        tracing::debug!(slot, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(slot, "Slot removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(slot)(e)),
        }
    }
}
