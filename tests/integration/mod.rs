/// Integration tests running the real SQLite storage end to end
use chrono::NaiveDate;
use tempfile::NamedTempFile;

use habit_tracker_cli::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_full_workflow_on_disk() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path()).expect("Failed to create storage");

    let run = storage
        .create_habit("Morning Run", Periodicity::Daily, date(2024, 6, 1))
        .unwrap();
    let review = storage
        .create_habit("Weekly Review", Periodicity::Weekly, date(2024, 6, 1))
        .unwrap();

    // Days 1,2,3,5,6 for the daily habit; day 4 missed.
    for d in [1, 2, 3, 5, 6] {
        let event = CompletionEvent::new(run.id, date(2024, 6, d), date(2024, 6, 6)).unwrap();
        storage.record_completion(&event).unwrap();
    }
    // One completion for the weekly habit, two weeks back.
    let event = CompletionEvent::from_existing(review.id, date(2024, 5, 27));
    storage.record_completion(&event).unwrap();

    let snapshot = Snapshot::load(&storage).unwrap();
    assert_eq!(snapshot.habits().len(), 2);

    let report = snapshot.streak_report(&run, date(2024, 6, 6)).unwrap();
    assert_eq!(report.current_streak, 2);
    assert_eq!(report.longest_streak, 3);
    assert_eq!(report.longest_break, 1);
    assert_eq!(report.total_completions, 5);
    assert_eq!(report.total_breaks, 1);

    // 2024-06-06 is in the week of 2024-06-03; the review done on 05-27 is
    // one week stale, so its chain survives but it is due this week.
    let report = snapshot.streak_report(&review, date(2024, 6, 6)).unwrap();
    assert_eq!(report.current_streak, 1);
    assert_eq!(snapshot.due(Periodicity::Weekly, date(2024, 6, 6)), vec![review.id]);
    assert!(snapshot.due(Periodicity::Daily, date(2024, 6, 6)).is_empty());

    assert_eq!(
        snapshot.longest_streak_overall(date(2024, 6, 6)).unwrap(),
        Some((run.id, 3))
    );
}

#[test]
fn test_persistence_across_reopen() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");

    {
        let storage = SqliteStorage::new(temp_file.path()).unwrap();
        let habit = storage
            .create_habit("Read", Periodicity::Daily, date(2024, 6, 1))
            .unwrap();
        let event = CompletionEvent::from_existing(habit.id, date(2024, 6, 1));
        storage.record_completion(&event).unwrap();
    }

    // Reopen the same file; everything must still be there.
    let storage = SqliteStorage::new(temp_file.path()).unwrap();
    let habit = storage.get_habit_by_name("Read").unwrap();
    assert_eq!(habit.periodicity, Periodicity::Daily);
    assert_eq!(
        storage.completions_for_habit(habit.id).unwrap(),
        vec![date(2024, 6, 1)]
    );
}

#[test]
fn test_duplicate_name_surfaces_as_typed_error() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path()).unwrap();

    storage
        .create_habit("Read", Periodicity::Daily, date(2024, 6, 1))
        .unwrap();
    let err = storage
        .create_habit("Read", Periodicity::Daily, date(2024, 6, 2))
        .unwrap_err();
    assert!(matches!(err, StorageError::DuplicateHabitName { .. }));
}

#[test]
fn test_delete_removes_history() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path()).unwrap();

    let habit = storage
        .create_habit("Read", Periodicity::Daily, date(2024, 6, 1))
        .unwrap();
    let event = CompletionEvent::from_existing(habit.id, date(2024, 6, 1));
    storage.record_completion(&event).unwrap();

    storage.delete_habit(habit.id).unwrap();

    assert!(matches!(
        storage.get_habit(habit.id),
        Err(StorageError::HabitNotFound { .. })
    ));
    // A fresh snapshot no longer sees the habit.
    let snapshot = Snapshot::load(&storage).unwrap();
    assert!(snapshot.habits().is_empty());
}

#[test]
fn test_cli_commands_against_store() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path()).unwrap();
    let today = date(2024, 6, 6);

    run(
        &storage,
        Command::Add {
            name: "Meditate".to_string(),
            periodicity: Periodicity::Daily,
        },
        today,
    )
    .unwrap();

    run(
        &storage,
        Command::Done {
            name: "Meditate".to_string(),
            date: None,
        },
        today,
    )
    .unwrap();

    let habit = storage.get_habit_by_name("Meditate").unwrap();
    assert_eq!(storage.completions_for_habit(habit.id).unwrap(), vec![today]);

    // Report commands run cleanly over the populated store.
    run(&storage, Command::List, today).unwrap();
    run(&storage, Command::Streaks, today).unwrap();
    run(
        &storage,
        Command::Due {
            periodicity: Periodicity::Daily,
        },
        today,
    )
    .unwrap();
    run(&storage, Command::Stats { days: Some(7) }, today).unwrap();

    run(
        &storage,
        Command::Delete {
            name: "Meditate".to_string(),
        },
        today,
    )
    .unwrap();
    assert!(storage.list_habits().unwrap().is_empty());
}

#[test]
fn test_future_completion_rejected_at_cli_boundary() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path()).unwrap();
    let today = date(2024, 6, 6);

    run(
        &storage,
        Command::Add {
            name: "Meditate".to_string(),
            periodicity: Periodicity::Daily,
        },
        today,
    )
    .unwrap();

    let err = run(
        &storage,
        Command::Done {
            name: "Meditate".to_string(),
            date: Some(date(2024, 6, 7)),
        },
        today,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::InvalidDate(_))));
}
