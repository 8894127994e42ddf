#![doc(test(attr(deny(warnings))))]

//! Cart Ledger records the sales and expenses of a street food cart and reports
//! them per business day, per business week, and across all time.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            version = utils::build_info::VERSION,
            "cart ledger tracing initialized"
        );
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }
}
