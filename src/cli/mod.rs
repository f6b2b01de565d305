//! Interactive shell standing in for the tracker's GUI.

pub mod commands;
pub mod io;
pub mod output;
pub mod shell;

use thiserror::Error;

use crate::core::services::ServiceError;
use crate::errors::LedgerError;

pub use commands::{CliMode, ShellContext};
pub use shell::run_cli;

/// Fatal shell failures that abort the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Recoverable per-command failures, reported and swallowed by the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("dialog error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("exit requested")]
    ExitRequested,
}
