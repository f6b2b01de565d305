//! Ledger domain models and period queries.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod record;

pub use ledger::Ledger;
pub use period::Period;
pub use record::{CalendarSystem, Record, RecordKind};
