#![doc(test(attr(deny(warnings))))]

//! Tracker Core offers the calendar conversion, ledger, and summary
//! primitives behind a dual-calendar expense and income tracker shell.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tracker Core tracing initialized.");
    });
}
