/// Streak and break analysis for a single habit
///
/// This module implements the core computation of the tracker: given a
/// habit's completion history and periodicity, derive current streak,
/// longest streak, and break statistics. The analysis is a pure function of
/// its inputs - no clocks, no storage, no hidden state - so the same history
/// always produces the same report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{DomainError, PeriodKey, Periodicity};

/// Calculated streak statistics for a habit
///
/// All counts are in periods (days for daily habits, ISO weeks for weekly
/// habits), never raw event counts. Computed on demand, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakReport {
    /// Consecutive periods completed, counting back from the period
    /// containing `as_of` (or the one just before it)
    pub current_streak: u32,
    /// Best consecutive run anywhere in the history
    pub longest_streak: u32,
    /// Most missed periods between two completed periods
    pub longest_break: u32,
    /// Number of distinct periods with at least one completion
    pub total_completions: u32,
    /// Total missed periods strictly between the first and last completed
    /// period (sum of all gap lengths, not the number of gaps)
    pub total_breaks: u32,
}

/// Analyze a habit's completion history as of a given date
///
/// Timestamps may arrive in any order and may contain several completions
/// within one period; they are collapsed to distinct periods before any
/// counting. An empty history is not an error - it yields the all-zero
/// report.
pub fn analyze(
    periodicity: Periodicity,
    completions: &[NaiveDate],
    as_of: NaiveDate,
) -> Result<StreakReport, DomainError> {
    // Dedup by period and order ascending; BTreeSet does both.
    let periods: Vec<PeriodKey> = completions
        .iter()
        .map(|d| periodicity.period_key(*d))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let Some(last) = periods.last() else {
        return Ok(StreakReport::default());
    };

    let total_completions = periods.len() as u32;

    // Single forward scan for longest streak and break statistics. A gap of
    // g periods between consecutive completed periods means g - 1 misses.
    let mut longest_streak = 1u32;
    let mut run = 1u32;
    let mut longest_break = 0u32;
    let mut total_breaks = 0u32;

    for pair in periods.windows(2) {
        let gap = pair[0].periods_between(&pair[1])?;
        if gap == 1 {
            run += 1;
        } else {
            longest_streak = longest_streak.max(run);
            run = 1;
            let missed = (gap - 1) as u32;
            longest_break = longest_break.max(missed);
            total_breaks += missed;
        }
    }
    longest_streak = longest_streak.max(run);

    // Current streak: the chain is alive if the most recent completed period
    // is the period containing as_of or the one immediately before it.
    // Anything further back means the streak is already broken.
    let behind = last.periods_between(&periodicity.period_key(as_of))?;
    let mut current_streak = 0u32;
    if behind <= 1 {
        current_streak = 1;
        let mut idx = periods.len() - 1;
        while idx > 0 {
            if periods[idx - 1].periods_between(&periods[idx])? == 1 {
                current_streak += 1;
                idx -= 1;
            } else {
                break;
            }
        }
    }

    Ok(StreakReport {
        current_streak,
        longest_streak,
        longest_break,
        total_completions,
        total_breaks,
    })
}
