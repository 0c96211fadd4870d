/// Unit tests for the analytics engine against the public surface
use chrono::NaiveDate;
use std::collections::HashMap;

use habit_tracker_cli::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn habit(id: i64, name: &str, periodicity: Periodicity, created: NaiveDate) -> Habit {
    Habit::from_existing(HabitId::from_raw(id), name.to_string(), periodicity, created)
}

mod analyzer {
    use super::*;

    #[test]
    fn test_empty_history_yields_zero_report() {
        let report = analyze(Periodicity::Daily, &[], date(2024, 6, 10)).unwrap();
        assert_eq!(report, StreakReport::default());
    }

    #[test]
    fn test_daily_scenario_with_missed_day() {
        // Days 1,2,3,5,6 completed, day 4 missed, evaluated on day 6.
        let history: Vec<NaiveDate> = [1, 2, 3, 5, 6].iter().map(|d| date(2024, 6, *d)).collect();
        let report = analyze(Periodicity::Daily, &history, date(2024, 6, 6)).unwrap();

        assert_eq!(report.current_streak, 2);
        assert_eq!(report.longest_streak, 3);
        assert_eq!(report.longest_break, 1);
        assert_eq!(report.total_completions, 5);
        assert_eq!(report.total_breaks, 1);
    }

    #[test]
    fn test_weekly_stale_completion() {
        // One completion in 2024-W01, evaluated in 2024-W03.
        let report =
            analyze(Periodicity::Weekly, &[date(2024, 1, 3)], date(2024, 1, 17)).unwrap();
        assert_eq!(report.current_streak, 0);
        assert_eq!(report.longest_streak, 1);
    }

    #[test]
    fn test_same_day_duplicates_deduplicated() {
        let history = [date(2024, 6, 10), date(2024, 6, 10), date(2024, 6, 10)];
        let report = analyze(Periodicity::Daily, &history, date(2024, 6, 10)).unwrap();
        assert_eq!(report.total_completions, 1);
    }

    #[test]
    fn test_longest_streak_dominates_current() {
        let histories: Vec<Vec<NaiveDate>> = vec![
            vec![date(2024, 6, 10)],
            vec![date(2024, 6, 1), date(2024, 6, 2), date(2024, 6, 10)],
            (1..=10).map(|d| date(2024, 6, d)).collect(),
        ];
        for history in histories {
            let report = analyze(Periodicity::Daily, &history, date(2024, 6, 10)).unwrap();
            assert!(report.longest_streak >= report.current_streak);
        }
    }

    #[test]
    fn test_analyze_is_pure() {
        let history = [date(2024, 6, 2), date(2024, 6, 5), date(2024, 6, 6)];
        let first = analyze(Periodicity::Daily, &history, date(2024, 6, 7)).unwrap();
        let second = analyze(Periodicity::Daily, &history, date(2024, 6, 7)).unwrap();
        assert_eq!(first, second);
    }
}

mod calendar {
    use super::*;

    #[test]
    fn test_adjacent_round_trip() {
        for p in [Periodicity::Daily, Periodicity::Weekly] {
            for d in [
                date(2024, 1, 1),
                date(2024, 2, 29),
                date(2024, 12, 31),
                date(2021, 1, 3),
            ] {
                let key = p.period_key(d);
                assert_eq!(key.previous().next(), key);
            }
        }
    }

    #[test]
    fn test_week_rollover_at_year_boundary() {
        // 2024-W52 is followed by 2025-W01.
        let w52 = Periodicity::Weekly.period_key(date(2024, 12, 28));
        let w01 = w52.next();
        assert_eq!((w01.iso_year(), w01.iso_week()), (2025, 1));
        assert_eq!(w52.periods_between(&w01).unwrap(), 1);
    }
}

mod aggregator {
    use super::*;

    fn snapshot(entries: Vec<(Habit, Vec<NaiveDate>)>) -> Snapshot {
        let mut habits = Vec::new();
        let mut completions = HashMap::new();
        for (h, dates) in entries {
            completions.insert(h.id, dates);
            habits.push(h);
        }
        Snapshot::from_parts(habits, completions)
    }

    #[test]
    fn test_struggling_thresholds() {
        // Ten elapsed daily periods: 3 completions struggle, 6 do not.
        let as_of = date(2024, 6, 10);
        let created = date(2024, 6, 1);
        let snap = snapshot(vec![
            (
                habit(1, "reading", Periodicity::Daily, created),
                (1..=3).map(|d| date(2024, 6, d)).collect(),
            ),
            (
                habit(2, "running", Periodicity::Daily, created),
                (1..=6).map(|d| date(2024, 6, d)).collect(),
            ),
        ]);

        assert_eq!(snap.struggling_habits(as_of).unwrap(), vec![HabitId(1)]);
    }

    #[test]
    fn test_longest_overall_tie_goes_to_oldest() {
        let as_of = date(2024, 6, 10);
        let dates = vec![date(2024, 6, 9), date(2024, 6, 10)];
        let snap = snapshot(vec![
            (
                habit(1, "newer", Periodicity::Daily, date(2024, 6, 1)),
                dates.clone(),
            ),
            (
                habit(2, "older", Periodicity::Daily, date(2024, 5, 1)),
                dates,
            ),
        ]);

        assert_eq!(
            snap.longest_streak_overall(as_of).unwrap(),
            Some((HabitId(2), 2))
        );
    }

    #[test]
    fn test_due_excludes_completed_this_period() {
        let as_of = date(2024, 6, 13);
        let snap = snapshot(vec![
            (
                habit(1, "water", Periodicity::Daily, date(2024, 6, 1)),
                vec![date(2024, 6, 13)],
            ),
            (
                habit(2, "gym", Periodicity::Daily, date(2024, 6, 1)),
                vec![date(2024, 6, 12)],
            ),
        ]);

        assert_eq!(snap.due(Periodicity::Daily, as_of), vec![HabitId(2)]);
        let done = snap.completed_in_current_period(Periodicity::Daily, as_of);
        assert_eq!(done.get(&HabitId(1)), Some(&date(2024, 6, 13)));
    }

    #[test]
    fn test_snapshot_queries_are_idempotent() {
        let as_of = date(2024, 6, 10);
        let snap = snapshot(vec![(
            habit(1, "yoga", Periodicity::Weekly, date(2024, 5, 1)),
            vec![date(2024, 5, 8), date(2024, 5, 20), date(2024, 6, 4)],
        )]);

        assert_eq!(
            snap.struggling_habits(as_of).unwrap(),
            snap.struggling_habits(as_of).unwrap()
        );
        assert_eq!(
            snap.longest_streak_overall(as_of).unwrap(),
            snap.longest_streak_overall(as_of).unwrap()
        );
        assert_eq!(
            snap.completed_in_current_period(Periodicity::Weekly, as_of),
            snap.completed_in_current_period(Periodicity::Weekly, as_of)
        );
    }
}
