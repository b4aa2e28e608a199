//! Deadline selection
//!
//! A conference may list several deadlines. This module decides which one
//! represents the conference (the "primary" deadline) and which ones are
//! still ahead of the clock.

use super::clock::Clock;
use super::normalize::normalize_with;
use crate::conference::{ConferenceRecord, DeadlineEntry};
use chrono::{DateTime, Utc};

/// A deadline entry together with its normalized instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeadline {
    pub entry: DeadlineEntry,
    pub instant: DateTime<Utc>,
}

impl ResolvedDeadline {
    /// Check if the deadline is at or after the clock's current instant
    pub fn is_upcoming(&self, clock: &Clock) -> bool {
        self.instant >= clock.now()
    }
}

/// All parseable deadlines of a record, in declaration order
///
/// Entries that are TBD or unparseable are dropped.
pub fn resolved_deadlines(record: &ConferenceRecord, clock: &Clock) -> Vec<ResolvedDeadline> {
    record
        .all_deadlines()
        .into_iter()
        .filter_map(|entry| {
            let instant = normalize_with(&entry.date, record.timezone_for(&entry), clock.local())?;
            Some(ResolvedDeadline { entry, instant })
        })
        .collect()
}

/// Pick the deadline that represents the conference
///
/// # Returns
/// - the earliest upcoming deadline if any deadline is still ahead
/// - otherwise the most recent past deadline
/// - None if no deadline could be interpreted
///
/// Entries sharing the same instant are resolved in declaration order.
pub fn primary_deadline(record: &ConferenceRecord, clock: &Clock) -> Option<ResolvedDeadline> {
    let (future, past): (Vec<_>, Vec<_>) = resolved_deadlines(record, clock)
        .into_iter()
        .partition(|d| d.is_upcoming(clock));

    if !future.is_empty() {
        // min_by_key keeps the first of equal minima
        return future.into_iter().min_by_key(|d| d.instant);
    }

    past.into_iter()
        .reduce(|latest, d| if d.instant > latest.instant { d } else { latest })
}

/// Deadlines that are still ahead, soonest first
///
/// Empty when every deadline has passed or none could be interpreted.
pub fn upcoming_deadlines(record: &ConferenceRecord, clock: &Clock) -> Vec<ResolvedDeadline> {
    let mut upcoming: Vec<ResolvedDeadline> = resolved_deadlines(record, clock)
        .into_iter()
        .filter(|d| d.is_upcoming(clock))
        .collect();
    upcoming.sort_by_key(|d| d.instant);
    upcoming
}

/// The soonest upcoming deadline, if any
pub fn next_upcoming_deadline(record: &ConferenceRecord, clock: &Clock) -> Option<ResolvedDeadline> {
    upcoming_deadlines(record, clock).into_iter().next()
}

/// Check if at least one deadline is still ahead
pub fn has_upcoming_deadlines(record: &ConferenceRecord, clock: &Clock) -> bool {
    resolved_deadlines(record, clock)
        .iter()
        .any(|d| d.is_upcoming(clock))
}
