use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{Slot, SlotStorage};
use crate::errors::Result;
use crate::utils::paths::{ensure_dir, write_atomic};

const SLOT_EXTENSION: &str = "json";

/// Stores each slot as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(format!("{}.{}", slot.key(), SLOT_EXTENSION))
    }
}

impl SlotStorage for JsonFileStorage {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, slot: Slot, data: &str) -> Result<()> {
        write_atomic(&self.slot_path(slot), data)?;
        Ok(())
    }
}
