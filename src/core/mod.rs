pub mod record_store;
pub mod services;
pub mod time;

pub use record_store::RecordStore;
