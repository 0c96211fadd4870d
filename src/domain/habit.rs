/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents something the
/// user wants to do regularly, along with its validation rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HabitId, Periodicity};

/// A habit represents something the user wants to do regularly
///
/// This is the core entity in our system. A habit's identity (name and
/// periodicity) is immutable after creation; the only mutation path is
/// deleting the habit, which also removes its completion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Storage-assigned unique identifier
    pub id: HabitId,
    /// Display name (e.g., "Morning Run"), unique across all habits
    pub name: String,
    /// Whether this habit is completed per day or per ISO week
    pub periodicity: Periodicity,
    /// The date this habit was created; analytics measure from here
    pub created_at: NaiveDate,
}

impl Habit {
    /// Create a habit from existing data (used when loading from storage)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer when loading habits from the database.
    pub fn from_existing(
        id: HabitId,
        name: String,
        periodicity: Periodicity,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id,
            name,
            periodicity,
            created_at,
        }
    }

    /// Validate a habit name according to business rules
    ///
    /// Returns the trimmed name on success. Storage enforces uniqueness;
    /// this only checks shape.
    pub fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(trimmed.to_string())
    }
}
