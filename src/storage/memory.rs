use std::{collections::HashMap, sync::Mutex};

use super::{Slot, SlotStorage};
use crate::errors::{LedgerError, Result};

/// In-process slot storage; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<Slot, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Slot, String>>> {
        self.slots
            .lock()
            .map_err(|_| LedgerError::Storage("memory storage lock poisoned".into()))
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.lock()?.get(&slot).cloned())
    }

    fn write(&self, slot: Slot, data: &str) -> Result<()> {
        self.lock()?.insert(slot, data.to_string());
        Ok(())
    }
}
