/// Analytics engine for streak computation and cross-habit reports
///
/// This module holds the pure computation core of the tracker: the per-habit
/// streak/break analyzer and the snapshot-based aggregator that answers
/// cross-habit queries. Nothing in here touches storage or the clock; both
/// arrive as explicit inputs.

pub mod aggregate;
pub mod streak;

// Re-export the analytics surface
pub use aggregate::{PeriodStats, Snapshot};
pub use streak::{analyze, StreakReport};
