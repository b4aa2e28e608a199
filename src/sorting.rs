//! Deadline ordering of conference listings

use crate::conference::ConferenceRecord;
use crate::deadline::{Clock, primary_deadline};
use crate::filtering::{FilterCriteria, filter_conferences};
use chrono::{DateTime, Utc};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Order two optional deadline instants; missing deadlines go last
fn compare_deadlines(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort conferences by their primary deadline, soonest first
///
/// The primary deadline is the next upcoming one, or the most recent past
/// one when all have passed. Conferences without any usable deadline are
/// placed after all others. The sort is stable: conferences with equal
/// keys keep their input order.
///
/// Works with owned records and with references alike.
pub fn sort_by_deadline<R>(records: Vec<R>, clock: &Clock) -> Vec<R>
where
    R: Borrow<ConferenceRecord>,
{
    let mut keyed: Vec<(Option<DateTime<Utc>>, R)> = records
        .into_iter()
        .map(|record| {
            let key = primary_deadline(record.borrow(), clock).map(|d| d.instant);
            (key, record)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_deadlines(*a, *b));
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Filter then sort: the full listing pipeline
pub fn list_conferences<'a, I>(
    records: I,
    criteria: &FilterCriteria,
    clock: &Clock,
) -> Vec<&'a ConferenceRecord>
where
    I: IntoIterator<Item = &'a ConferenceRecord>,
{
    sort_by_deadline(filter_conferences(records, criteria, clock), clock)
}
