/// CompletionEvent entity for tracking habit completions
///
/// This module defines the CompletionEvent struct that represents a single
/// instance of completing a habit on a specific day. Events are append-only:
/// they are never edited, and the only way to remove them is deleting the
/// whole habit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HabitId};

/// A record of completing a habit on a specific day
///
/// Multiple events per habit may land in the same period (e.g., a daily habit
/// logged twice on one day); the analytics engine deduplicates by period, so
/// storing duplicates is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// Which habit this completion is for
    pub habit_id: HabitId,
    /// The day the habit was completed
    pub completed_at: NaiveDate,
}

impl CompletionEvent {
    /// Create a new completion event with validation
    ///
    /// Rejects future dates relative to `today`. The analyzer itself accepts
    /// any date; this constructor is the policy boundary the CLI goes
    /// through.
    pub fn new(
        habit_id: HabitId,
        completed_at: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        if completed_at > today {
            return Err(DomainError::InvalidDate(
                "Cannot log habits for future dates".to_string(),
            ));
        }

        Ok(Self {
            habit_id,
            completed_at,
        })
    }

    /// Create an event from existing data (used when loading from storage)
    pub fn from_existing(habit_id: HabitId, completed_at: NaiveDate) -> Self {
        Self {
            habit_id,
            completed_at,
        }
    }
}
