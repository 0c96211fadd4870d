/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides a
/// clean interface for storing and retrieving habits and their completion
/// events. Analytics never goes through here directly - it receives data
/// already loaded into a snapshot.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{CompletionEvent, Habit, HabitId, Periodicity};

/// Errors that can occur during storage operations
///
/// All of these are non-retryable from the caller's point of view: either
/// the input was wrong (duplicate name, missing habit) or the database
/// itself failed.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("A habit named '{name}' already exists")]
    DuplicateHabitName { name: String },

    #[error("Habit not found: {habit}")]
    HabitNotFound { habit: String },
}

/// Trait defining the storage interface for habits
///
/// This trait keeps the analytics and CLI layers independent of SQLite and
/// lets tests substitute their own store.
pub trait HabitStore {
    /// Create a new habit and return it with its assigned id
    fn create_habit(
        &self,
        name: &str,
        periodicity: Periodicity,
        created_at: NaiveDate,
    ) -> Result<Habit, StorageError>;

    /// Get a habit by its id
    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError>;

    /// Get a habit by its unique name
    fn get_habit_by_name(&self, name: &str) -> Result<Habit, StorageError>;

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Delete a habit and all of its completion events
    fn delete_habit(&self, habit_id: HabitId) -> Result<(), StorageError>;

    /// Append a completion event for a habit
    fn record_completion(&self, event: &CompletionEvent) -> Result<(), StorageError>;

    /// All completion dates recorded for a habit, in insertion order
    fn completions_for_habit(&self, habit_id: HabitId) -> Result<Vec<NaiveDate>, StorageError>;
}
