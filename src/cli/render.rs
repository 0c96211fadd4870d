/// Table rendering for CLI reports
///
/// All report output goes through comfy-table so every command renders the
/// same way. Builders return the table as a value; printing stays with the
/// handlers.

use chrono::NaiveDate;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};

use crate::analytics::{PeriodStats, StreakReport};
use crate::domain::Habit;

fn base_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header.into_iter().map(Cell::new).collect::<Vec<_>>());
    table
}

/// All habits with periodicity and creation date
pub fn habit_list(habits: &[Habit]) -> Table {
    let mut table = base_table(vec!["Habit", "Periodicity", "Created"]);
    for habit in habits {
        table.add_row(vec![
            Cell::new(&habit.name),
            Cell::new(habit.periodicity.as_str()),
            Cell::new(habit.created_at.to_string()),
        ]);
    }
    table
}

/// Per-habit streak report
pub fn streak_table(rows: &[(Habit, StreakReport)]) -> Table {
    let mut table = base_table(vec![
        "Habit",
        "Periodicity",
        "Current Streak",
        "Longest Streak",
        "Longest Break",
        "Completions",
        "Missed Periods",
    ]);
    for (habit, report) in rows {
        table.add_row(vec![
            Cell::new(&habit.name),
            Cell::new(habit.periodicity.as_str()),
            Cell::new(report.current_streak.to_string()),
            Cell::new(report.longest_streak.to_string()),
            Cell::new(report.longest_break.to_string()),
            Cell::new(report.total_completions.to_string()),
            Cell::new(report.total_breaks.to_string()),
        ]);
    }
    table
}

/// Habits still due in the current period
pub fn due_table(habits: &[&Habit]) -> Table {
    let mut table = base_table(vec!["Habit", "Periodicity", "Created"]);
    for habit in habits {
        table.add_row(vec![
            Cell::new(&habit.name),
            Cell::new(habit.periodicity.as_str()),
            Cell::new(habit.created_at.to_string()),
        ]);
    }
    table
}

/// Habits completed in the current period with their last completion date
pub fn completed_table(rows: &[(Habit, NaiveDate)]) -> Table {
    let mut table = base_table(vec!["Habit", "Periodicity", "Last Completed"]);
    for (habit, date) in rows {
        table.add_row(vec![
            Cell::new(&habit.name),
            Cell::new(habit.periodicity.as_str()),
            Cell::new(date.to_string()),
        ]);
    }
    table
}

/// Completion statistics per habit
pub fn stats_table(rows: &[(Habit, PeriodStats)]) -> Table {
    let mut table = base_table(vec![
        "Habit",
        "Periodicity",
        "Completed Periods",
        "Missed Periods",
        "Completion Rate",
    ]);
    for (habit, stats) in rows {
        table.add_row(vec![
            Cell::new(&habit.name),
            Cell::new(habit.periodicity.as_str()),
            Cell::new(stats.completed_periods.to_string()),
            Cell::new(stats.missed_periods.to_string()),
            Cell::new(format!("{:.1}%", stats.completion_rate)),
        ]);
    }
    table
}
