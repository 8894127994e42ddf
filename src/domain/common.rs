use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Records stamped with their creation instant (milliseconds since the epoch).
pub trait Timestamped {
    fn timestamp(&self) -> i64;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// UTC instant matching a millisecond timestamp, falling back to `fallback` when the
/// value is outside chrono's range.
pub(crate) fn utc_from_millis(timestamp: i64, fallback: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(timestamp)
        .single()
        .unwrap_or(fallback)
}
