#![doc(test(attr(deny(warnings))))]

//! Brainy Pockets is a personal money tracker: a ledger of incomes and
//! expenses with a derived balance, manually tracked savings goals, and a
//! terminal shell to drive them.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            "Brainy Pockets tracing initialized."
        );
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
