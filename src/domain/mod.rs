/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, CompletionEvent) and the
/// period calendar that maps dates onto daily/weekly periods. These types
/// represent the fundamental concepts in our habit tracking system.

pub mod completion;
pub mod habit;
pub mod period;
pub mod types;

// Re-export public types for easy access
pub use completion::*;
pub use habit::*;
pub use period::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid periodicity: {0} (expected 'daily' or 'weekly')")]
    InvalidPeriodicity(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Mismatched period keys: cannot compare {a} with {b}")]
    PeriodMismatch { a: String, b: String },
}
