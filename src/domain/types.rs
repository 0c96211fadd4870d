/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like HabitId and Periodicity
/// that are used by Habit, CompletionEvent, and the analytics engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// This is a wrapper around the storage-assigned integer id to provide type
/// safety - you can't accidentally pass some other integer where a habit id
/// is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(pub i64);

impl HabitId {
    /// Create a habit id from a raw database row value
    pub fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value (useful for SQL parameters)
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit should be completed
///
/// Exactly one completion per period counts: a calendar day for Daily habits,
/// an ISO week (Monday through Sunday) for Weekly habits. This is a closed
/// enum so an invalid periodicity cannot exist past the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    /// Every single day
    Daily,
    /// Once per ISO week (Monday-Sunday)
    Weekly,
}

impl Periodicity {
    /// Get the canonical string form used in storage and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Daily => "daily",
            Periodicity::Weekly => "weekly",
        }
    }
}

impl FromStr for Periodicity {
    type Err = DomainError;

    /// Parse a periodicity tag, case-insensitively
    ///
    /// This is the single place where untrusted periodicity strings (CLI
    /// arguments, database rows) become typed values. Anything unrecognized
    /// is rejected here rather than leaking into the calendar math.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Periodicity::Daily),
            "weekly" => Ok(Periodicity::Weekly),
            other => Err(DomainError::InvalidPeriodicity(other.to_string())),
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
