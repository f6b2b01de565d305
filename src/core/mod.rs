//! Application services layered over the ledger domain types.

pub mod services;
