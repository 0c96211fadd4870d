/// Period calendar: mapping dates onto daily/weekly periods
///
/// This module defines the PeriodKey type that identifies one discrete
/// calendar slot (a day, or an ISO week running Monday through Sunday) and
/// the arithmetic the streak analyzer needs: adjacent periods and signed
/// distances between periods. Everything here is pure and deterministic.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{DomainError, Periodicity};

/// Identifies one period on the calendar
///
/// For weekly periods the key holds the Monday of the ISO week, which makes
/// adjacency and distance plain date arithmetic and rolls over year
/// boundaries correctly (week 1 of a year follows week 52/53 of the year
/// before). The ISO (week-year, week-number) pair is available through
/// `iso_year()` / `iso_week()` for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PeriodKey {
    /// A single calendar day
    Day(NaiveDate),
    /// An ISO week, keyed by its Monday
    Week(NaiveDate),
}

impl Periodicity {
    /// Get the period key containing the given date
    pub fn period_key(&self, date: NaiveDate) -> PeriodKey {
        match self {
            Periodicity::Daily => PeriodKey::Day(date),
            Periodicity::Weekly => PeriodKey::Week(start_of_week(date)),
        }
    }
}

/// Get the Monday of the ISO week containing the given date
fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

impl PeriodKey {
    /// The immediately preceding period
    pub fn previous(&self) -> PeriodKey {
        match self {
            PeriodKey::Day(d) => PeriodKey::Day(*d - Duration::days(1)),
            PeriodKey::Week(monday) => PeriodKey::Week(*monday - Duration::days(7)),
        }
    }

    /// The immediately following period
    pub fn next(&self) -> PeriodKey {
        match self {
            PeriodKey::Day(d) => PeriodKey::Day(*d + Duration::days(1)),
            PeriodKey::Week(monday) => PeriodKey::Week(*monday + Duration::days(7)),
        }
    }

    /// Signed number of period steps from `self` to `other`
    ///
    /// Positive when `other` is later. Adjacent periods are 1 apart; a result
    /// greater than 1 between consecutive completed periods means missed
    /// periods in between. Comparing a day key with a week key is a
    /// data-integrity error and is surfaced, not swallowed.
    pub fn periods_between(&self, other: &PeriodKey) -> Result<i64, DomainError> {
        match (self, other) {
            (PeriodKey::Day(a), PeriodKey::Day(b)) => Ok((*b - *a).num_days()),
            (PeriodKey::Week(a), PeriodKey::Week(b)) => Ok((*b - *a).num_days() / 7),
            (a, b) => Err(DomainError::PeriodMismatch {
                a: a.to_string(),
                b: b.to_string(),
            }),
        }
    }

    /// ISO week-year for week keys, calendar year for day keys
    pub fn iso_year(&self) -> i32 {
        match self {
            PeriodKey::Day(d) => d.year(),
            PeriodKey::Week(monday) => monday.iso_week().year(),
        }
    }

    /// ISO week number (week keys only make meaningful use of this)
    pub fn iso_week(&self) -> u32 {
        match self {
            PeriodKey::Day(d) => d.iso_week().week(),
            PeriodKey::Week(monday) => monday.iso_week().week(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Day(d) => write!(f, "{}", d),
            PeriodKey::Week(_) => write!(f, "{}-W{:02}", self.iso_year(), self.iso_week()),
        }
    }
}
