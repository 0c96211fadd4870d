/// Cross-habit analytics over an immutable snapshot
///
/// This module answers the questions that span all habits at once: which
/// habit holds the longest streak, which habits are struggling, what is due
/// or already done in the current period. Every query is a pure function of
/// (snapshot, as_of); commands load a fresh snapshot from storage, compute,
/// and discard it.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::analytics::{analyze, StreakReport};
use crate::domain::{DomainError, Habit, HabitId, Periodicity};
use crate::storage::{HabitStore, StorageError};

/// Completion-rate statistics for a habit over a timeframe
///
/// Counts are in periods; the rate is a percentage of periods with at least
/// one completion out of the periods elapsed in the timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Distinct periods with a completion inside the timeframe
    pub completed_periods: u32,
    /// Elapsed periods without any completion
    pub missed_periods: u32,
    /// Completion rate in percent (0.0 to 100.0)
    pub completion_rate: f64,
}

/// An immutable view of all habits and their completion histories
///
/// Loaded once at the start of each command and thrown away afterwards, so
/// no state survives between commands and every report reflects exactly what
/// storage held at load time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    habits: Vec<Habit>,
    completions: HashMap<HabitId, Vec<NaiveDate>>,
}

impl Snapshot {
    /// Load a fresh snapshot from storage
    ///
    /// Storage failures propagate unchanged; nothing here retries.
    pub fn load<S: HabitStore + ?Sized>(store: &S) -> Result<Self, StorageError> {
        let habits = store.list_habits()?;
        let mut completions = HashMap::with_capacity(habits.len());
        for habit in &habits {
            completions.insert(habit.id, store.completions_for_habit(habit.id)?);
        }
        Ok(Self {
            habits,
            completions,
        })
    }

    /// Build a snapshot directly from parts (used in tests and by callers
    /// that already hold the data)
    pub fn from_parts(habits: Vec<Habit>, completions: HashMap<HabitId, Vec<NaiveDate>>) -> Self {
        Self {
            habits,
            completions,
        }
    }

    /// All habits in the snapshot
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Completion dates recorded for a habit (empty if none)
    pub fn completions(&self, habit_id: HabitId) -> &[NaiveDate] {
        self.completions
            .get(&habit_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Streak report for one habit in this snapshot
    pub fn streak_report(
        &self,
        habit: &Habit,
        as_of: NaiveDate,
    ) -> Result<StreakReport, DomainError> {
        analyze(habit.periodicity, self.completions(habit.id), as_of)
    }

    /// The habit with the longest streak of all, with its length
    ///
    /// Ties are broken by earliest creation date, then by smallest id so the
    /// answer is fully deterministic. Returns None when there are no habits.
    pub fn longest_streak_overall(
        &self,
        as_of: NaiveDate,
    ) -> Result<Option<(HabitId, u32)>, DomainError> {
        let mut best: Option<(&Habit, u32)> = None;
        for habit in &self.habits {
            let length = self.streak_report(habit, as_of)?.longest_streak;
            let better = match best {
                None => true,
                Some((current, len)) => {
                    length > len
                        || (length == len
                            && (habit.created_at, habit.id) < (current.created_at, current.id))
                }
            };
            if better {
                best = Some((habit, length));
            }
        }
        Ok(best.map(|(habit, len)| (habit.id, len)))
    }

    /// Completion statistics for one habit over a timeframe
    ///
    /// With `last_days` the window starts at `as_of - last_days` (or the
    /// creation date, whichever is later); without it the window runs from
    /// creation to `as_of` inclusive.
    pub fn completion_stats(
        &self,
        habit: &Habit,
        as_of: NaiveDate,
        last_days: Option<u32>,
    ) -> Result<PeriodStats, DomainError> {
        let mut window_start = habit.created_at;
        if let Some(days) = last_days {
            window_start = window_start.max(as_of - Duration::days(days as i64));
        }

        let elapsed = habit
            .periodicity
            .period_key(window_start)
            .periods_between(&habit.periodicity.period_key(as_of))?
            + 1;
        if elapsed <= 0 {
            // Habit created after as_of; nothing has elapsed yet.
            return Ok(PeriodStats {
                completed_periods: 0,
                missed_periods: 0,
                completion_rate: 0.0,
            });
        }

        // Distinct completed periods within the window.
        let completed = self
            .completions(habit.id)
            .iter()
            .filter(|d| **d >= window_start && **d <= as_of)
            .map(|d| habit.periodicity.period_key(*d))
            .collect::<BTreeSet<_>>()
            .len() as u32;

        let missed = (elapsed as u32).saturating_sub(completed);
        let completion_rate = f64::from(completed) / elapsed as f64 * 100.0;

        Ok(PeriodStats {
            completed_periods: completed,
            missed_periods: missed,
            completion_rate,
        })
    }

    /// Habits completing less than half of their periods since creation
    pub fn struggling_habits(&self, as_of: NaiveDate) -> Result<Vec<HabitId>, DomainError> {
        let mut struggling = Vec::new();
        for habit in &self.habits {
            let stats = self.completion_stats(habit, as_of, None)?;
            if stats.completion_rate < 50.0 {
                struggling.push(habit.id);
            }
        }
        Ok(struggling)
    }

    /// Habits of the given periodicity with no completion yet in the period
    /// containing `as_of`
    pub fn due(&self, periodicity: Periodicity, as_of: NaiveDate) -> Vec<HabitId> {
        let current = periodicity.period_key(as_of);
        self.habits
            .iter()
            .filter(|h| h.periodicity == periodicity)
            .filter(|h| {
                !self
                    .completions(h.id)
                    .iter()
                    .any(|d| periodicity.period_key(*d) == current)
            })
            .map(|h| h.id)
            .collect()
    }

    /// Habits of the given periodicity already completed in the current
    /// period, with their most recent qualifying completion date
    pub fn completed_in_current_period(
        &self,
        periodicity: Periodicity,
        as_of: NaiveDate,
    ) -> BTreeMap<HabitId, NaiveDate> {
        let current = periodicity.period_key(as_of);
        let mut completed = BTreeMap::new();
        for habit in self.habits.iter().filter(|h| h.periodicity == periodicity) {
            let last = self
                .completions(habit.id)
                .iter()
                .filter(|d| periodicity.period_key(**d) == current)
                .max();
            if let Some(date) = last {
                completed.insert(habit.id, *date);
            }
        }
        completed
    }
}
