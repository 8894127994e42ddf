#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cart_ledger::{
    core::{time::FixedClock, RecordStore},
    storage::JsonFileStorage,
};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// São Paulo wall clock, UTC-3 without daylight saving.
pub fn tz() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).expect("valid offset")
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    tz().with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

pub fn millis(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    local(y, m, d, h, min).timestamp_millis()
}

/// Store on disk under `base/data`, frozen at `now`.
pub fn open_store(base: &Path, now: DateTime<Utc>) -> RecordStore {
    let storage = JsonFileStorage::new(base.join("data")).expect("create json slot storage");
    RecordStore::open(Box::new(storage), Box::new(FixedClock(now)))
}
