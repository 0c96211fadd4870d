/// Public library interface for the habit tracker CLI
///
/// This module exports the domain types, the analytics engine, and the
/// storage layer so the binary and the tests share one surface.

use thiserror::Error;

// Internal modules
mod analytics;
mod cli;
mod domain;
mod storage;

// Re-export public modules and types
pub use analytics::{analyze, PeriodStats, Snapshot, StreakReport};
pub use cli::{run, Command};
pub use domain::*;
pub use storage::{HabitStore, SqliteStorage, StorageError};

/// Errors that can occur while running a command
///
/// Each layer keeps its own error type; this is the roll-up the binary
/// reports. Nothing is retried - every failure here means bad input or a
/// broken external dependency, and stored state is never left half-applied
/// because analytics never writes.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("{0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
