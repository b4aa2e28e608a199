//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use conf_deadlines::{Clock, ConferenceRecord, DeadlineEntry, Zone};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// A clock frozen at 2025-01-01 00:00:00 UTC with UTC as local zone
pub fn test_clock() -> Clock {
    Clock::fixed(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), Zone::utc())
}

/// Create a record with a single legacy submission deadline
pub fn conf_with_deadline(id: &str, date: &str) -> ConferenceRecord {
    ConferenceRecord {
        deadline: Some(date.to_string()),
        ..ConferenceRecord::new(id, &id.to_uppercase())
    }
}

/// Create a record with structured deadlines
pub fn conf_with_deadlines(id: &str, entries: Vec<DeadlineEntry>) -> ConferenceRecord {
    ConferenceRecord {
        deadlines: entries,
        ..ConferenceRecord::new(id, &id.to_uppercase())
    }
}

/// Create a record with tags and an upcoming deadline
pub fn tagged_conf(id: &str, tags: &[&str]) -> ConferenceRecord {
    ConferenceRecord {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..conf_with_deadline(id, "2025-06-01 23:59")
    }
}

/// Collect record IDs in order
pub fn ids(records: &[&ConferenceRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

/// Write catalog text to a temporary file with the given extension
pub fn catalog_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}
