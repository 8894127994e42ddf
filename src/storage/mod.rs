//! Slot-based persistence for the two record lists.
//!
//! Each slot holds the JSON array of one collection. Loading never fails: a missing,
//! unreadable, or corrupt slot yields an empty list and a warning in the log.

pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Result;

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Sales,
    Expenses,
}

impl Slot {
    pub fn key(self) -> &'static str {
        match self {
            Slot::Sales => "sales",
            Slot::Expenses => "expenses",
        }
    }
}

/// Abstraction over key/value backends able to hold one serialized collection per slot.
pub trait SlotStorage: Send + Sync {
    /// Raw contents of the slot, `None` when it was never written.
    fn read(&self, slot: Slot) -> Result<Option<String>>;
    /// Replaces the slot contents in full.
    fn write(&self, slot: Slot, data: &str) -> Result<()>;
}

/// Serializes `records` and replaces the slot with them.
pub fn save_records<S, T>(storage: &S, slot: Slot, records: &[T]) -> Result<()>
where
    S: SlotStorage + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(records)?;
    storage.write(slot, &json)?;
    tracing::debug!(slot = slot.key(), records = records.len(), "slot written");
    Ok(())
}

/// Reads the slot as a list of records, falling back to an empty list.
pub fn load_records<S, T>(storage: &S, slot: Slot) -> Vec<T>
where
    S: SlotStorage + ?Sized,
    T: DeserializeOwned,
{
    let raw = match storage.read(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(slot = slot.key(), error = %err, "failed to read slot");
            return Vec::new();
        }
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(slot = slot.key(), error = %err, "discarding unparseable slot");
            Vec::new()
        }
    }
}
