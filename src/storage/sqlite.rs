/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing and
/// retrieving habit data. It handles all SQL queries and data conversion.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode, Row};

use crate::domain::{CompletionEvent, Habit, HabitId, Periodicity};
use crate::storage::{migrations, HabitStore, StorageError};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements all
/// the storage operations defined in the HabitStore trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations to
    /// ensure the schema is up to date.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Self::initialize(conn, &db_path.display().to_string())
    }

    /// Create an in-memory storage instance (useful for tests)
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Self::initialize(conn, ":memory:")
    }

    fn initialize(conn: Connection, location: &str) -> Result<Self, StorageError> {
        // Enable foreign key constraints; CASCADE on habit deletion
        // depends on this.
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {}", location);

        Ok(Self { conn })
    }

    /// Map a habits-table row to a Habit
    fn habit_from_row(row: &Row<'_>) -> Result<Habit, rusqlite::Error> {
        let id: i64 = row.get(0)?;
        let name: String = row.get(1)?;

        let periodicity_str: String = row.get(2)?;
        let periodicity = Periodicity::from_str(&periodicity_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(
                2,
                "Invalid periodicity".to_string(),
                rusqlite::types::Type::Text,
            )
        })?;

        let created_at: NaiveDate = row.get(3)?;

        Ok(Habit::from_existing(
            HabitId::from_raw(id),
            name,
            periodicity,
            created_at,
        ))
    }

    /// True when a rusqlite error is a UNIQUE/constraint violation
    fn is_constraint_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
        )
    }
}

impl HabitStore for SqliteStorage {
    /// Create a new habit in the database
    fn create_habit(
        &self,
        name: &str,
        periodicity: Periodicity,
        created_at: NaiveDate,
    ) -> Result<Habit, StorageError> {
        let result = self.conn.execute(
            "INSERT INTO habits (name, periodicity, created_at) VALUES (?1, ?2, ?3)",
            params![name, periodicity.as_str(), created_at],
        );

        match result {
            Ok(_) => {
                let id = HabitId::from_raw(self.conn.last_insert_rowid());
                tracing::debug!("Created habit: {} ({})", name, id);
                Ok(Habit::from_existing(
                    id,
                    name.to_string(),
                    periodicity,
                    created_at,
                ))
            }
            Err(e) if Self::is_constraint_violation(&e) => Err(StorageError::DuplicateHabitName {
                name: name.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// Get a habit by its id
    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, periodicity, created_at FROM habits WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![habit_id.raw()], Self::habit_from_row);

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit: habit_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// Get a habit by its unique name
    fn get_habit_by_name(&self, name: &str) -> Result<Habit, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, periodicity, created_at FROM habits WHERE name = ?1",
        )?;

        let result = stmt.query_row(params![name], Self::habit_from_row);

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit: name.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, periodicity, created_at FROM habits ORDER BY created_at ASC, id ASC",
        )?;

        let habit_iter = stmt.query_map([], Self::habit_from_row)?;

        let mut habits = Vec::new();
        for habit in habit_iter {
            habits.push(habit?);
        }

        Ok(habits)
    }

    /// Delete a habit; completions go with it via ON DELETE CASCADE
    fn delete_habit(&self, habit_id: HabitId) -> Result<(), StorageError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1", params![habit_id.raw()])?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit: habit_id.to_string(),
            });
        }

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }

    /// Append a completion event for a habit
    fn record_completion(&self, event: &CompletionEvent) -> Result<(), StorageError> {
        // Verify the habit exists so a bad id surfaces as HabitNotFound
        // rather than a silent foreign-key failure.
        self.get_habit(event.habit_id)?;

        self.conn.execute(
            "INSERT INTO habit_completions (habit_id, completed_at) VALUES (?1, ?2)",
            params![event.habit_id.raw(), event.completed_at],
        )?;

        tracing::debug!(
            "Recorded completion for habit {} on {}",
            event.habit_id,
            event.completed_at
        );
        Ok(())
    }

    /// All completion dates recorded for a habit
    ///
    /// Returned in insertion order; the analyzer sorts and deduplicates, so
    /// no ordering is promised here.
    fn completions_for_habit(&self, habit_id: HabitId) -> Result<Vec<NaiveDate>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT completed_at FROM habit_completions WHERE habit_id = ?1")?;

        let date_iter = stmt.query_map(params![habit_id.raw()], |row| row.get::<_, NaiveDate>(0))?;

        let mut dates = Vec::new();
        for date in date_iter {
            dates.push(date?);
        }

        Ok(dates)
    }
}
