/// Command-line interface for the habit tracker
///
/// This module defines the clap subcommands and their handlers. Every
/// command follows the same shape: load what it needs from storage into an
/// immutable snapshot, run the pure analytics, render a table, exit. No
/// state is carried between invocations.

mod render;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::analytics::Snapshot;
use crate::domain::{CompletionEvent, Habit, Periodicity};
use crate::storage::HabitStore;
use crate::AppError;

/// Available habit tracker commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new habit
    Add {
        /// Name of the habit (unique)
        name: String,
        /// How often the habit should be completed
        #[arg(short, long)]
        periodicity: Periodicity,
    },

    /// Delete a habit and its completion history
    Delete {
        /// Name of the habit to delete
        name: String,
    },

    /// Mark a habit as completed
    Done {
        /// Name of the habit to mark complete
        name: String,
        /// Completion date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List all habits
    List,

    /// Show streak and break statistics for every habit
    Streaks,

    /// Show habits not yet completed in the current period
    Due {
        /// Which habits to check: daily or weekly
        #[arg(short, long)]
        periodicity: Periodicity,
    },

    /// Show habits already completed in the current period
    Completed {
        /// Which habits to check: daily or weekly
        #[arg(short, long)]
        periodicity: Periodicity,
    },

    /// Show habits with a completion rate below 50%
    Struggling,

    /// Show completion statistics per habit
    Stats {
        /// Restrict to the last N days
        #[arg(short, long)]
        days: Option<u32>,
    },
}

/// Execute a command against the given store
///
/// `today` is passed in rather than read from the clock so the handlers stay
/// deterministic and testable.
pub fn run<S: HabitStore + ?Sized>(
    store: &S,
    command: Command,
    today: NaiveDate,
) -> Result<(), AppError> {
    match command {
        Command::Add { name, periodicity } => add(store, &name, periodicity, today),
        Command::Delete { name } => delete(store, &name),
        Command::Done { name, date } => done(store, &name, date, today),
        Command::List => list(store),
        Command::Streaks => streaks(store, today),
        Command::Due { periodicity } => due(store, periodicity, today),
        Command::Completed { periodicity } => completed(store, periodicity, today),
        Command::Struggling => struggling(store, today),
        Command::Stats { days } => stats(store, days, today),
    }
}

fn add<S: HabitStore + ?Sized>(
    store: &S,
    name: &str,
    periodicity: Periodicity,
    today: NaiveDate,
) -> Result<(), AppError> {
    let name = Habit::validate_name(name)?;
    let habit = store.create_habit(&name, periodicity, today)?;
    println!("Created {} habit '{}'", habit.periodicity, habit.name);
    Ok(())
}

fn delete<S: HabitStore + ?Sized>(store: &S, name: &str) -> Result<(), AppError> {
    let habit = store.get_habit_by_name(name)?;
    store.delete_habit(habit.id)?;
    println!("Deleted habit '{}' and its completion history", habit.name);
    Ok(())
}

fn done<S: HabitStore + ?Sized>(
    store: &S,
    name: &str,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), AppError> {
    let habit = store.get_habit_by_name(name)?;
    let event = CompletionEvent::new(habit.id, date.unwrap_or(today), today)?;
    store.record_completion(&event)?;
    println!("Marked '{}' complete for {}", habit.name, event.completed_at);
    Ok(())
}

fn list<S: HabitStore + ?Sized>(store: &S) -> Result<(), AppError> {
    let habits = store.list_habits()?;
    if habits.is_empty() {
        println!("No habits yet. Create one with 'add'.");
        return Ok(());
    }
    println!("{}", render::habit_list(&habits));
    Ok(())
}

fn streaks<S: HabitStore + ?Sized>(store: &S, today: NaiveDate) -> Result<(), AppError> {
    let snapshot = Snapshot::load(store)?;
    if snapshot.habits().is_empty() {
        println!("No habits yet. Create one with 'add'.");
        return Ok(());
    }

    let mut rows = Vec::new();
    for habit in snapshot.habits() {
        let report = snapshot.streak_report(habit, today)?;
        rows.push((habit.clone(), report));
    }
    println!("{}", render::streak_table(&rows));

    if let Some((id, length)) = snapshot.longest_streak_overall(today)? {
        if let Some(habit) = snapshot.habits().iter().find(|h| h.id == id) {
            println!(
                "Longest streak overall: '{}' with {} {}",
                habit.name,
                length,
                period_noun(habit.periodicity, length)
            );
        }
    }
    Ok(())
}

fn due<S: HabitStore + ?Sized>(
    store: &S,
    periodicity: Periodicity,
    today: NaiveDate,
) -> Result<(), AppError> {
    let snapshot = Snapshot::load(store)?;
    let due = snapshot.due(periodicity, today);
    let habits: Vec<&Habit> = snapshot
        .habits()
        .iter()
        .filter(|h| due.contains(&h.id))
        .collect();

    if habits.is_empty() {
        println!("Nothing due - all {} habits are done for this period.", periodicity);
        return Ok(());
    }
    println!("{}", render::due_table(&habits));
    Ok(())
}

fn completed<S: HabitStore + ?Sized>(
    store: &S,
    periodicity: Periodicity,
    today: NaiveDate,
) -> Result<(), AppError> {
    let snapshot = Snapshot::load(store)?;
    let completed = snapshot.completed_in_current_period(periodicity, today);

    if completed.is_empty() {
        println!("No {} habits completed in the current period yet.", periodicity);
        return Ok(());
    }

    let mut rows = Vec::new();
    for habit in snapshot.habits() {
        if let Some(date) = completed.get(&habit.id) {
            rows.push((habit.clone(), *date));
        }
    }
    println!("{}", render::completed_table(&rows));
    Ok(())
}

fn struggling<S: HabitStore + ?Sized>(store: &S, today: NaiveDate) -> Result<(), AppError> {
    let snapshot = Snapshot::load(store)?;
    let struggling = snapshot.struggling_habits(today)?;

    if struggling.is_empty() {
        println!("No struggling habits - everything is at 50% or better.");
        return Ok(());
    }

    let mut rows = Vec::new();
    for habit in snapshot.habits() {
        if struggling.contains(&habit.id) {
            let stats = snapshot.completion_stats(habit, today, None)?;
            rows.push((habit.clone(), stats));
        }
    }
    println!("{}", render::stats_table(&rows));
    Ok(())
}

fn stats<S: HabitStore + ?Sized>(
    store: &S,
    days: Option<u32>,
    today: NaiveDate,
) -> Result<(), AppError> {
    let snapshot = Snapshot::load(store)?;
    if snapshot.habits().is_empty() {
        println!("No habits yet. Create one with 'add'.");
        return Ok(());
    }

    let mut rows = Vec::new();
    for habit in snapshot.habits() {
        let stats = snapshot.completion_stats(habit, today, days)?;
        rows.push((habit.clone(), stats));
    }
    println!("{}", render::stats_table(&rows));
    Ok(())
}

fn period_noun(periodicity: Periodicity, count: u32) -> &'static str {
    match (periodicity, count) {
        (Periodicity::Daily, 1) => "day",
        (Periodicity::Daily, _) => "days",
        (Periodicity::Weekly, 1) => "week",
        (Periodicity::Weekly, _) => "weeks",
    }
}
