//! Formatting helper functions for conference listings
//!
//! This module renders filtered and sorted conferences as plain text.

use crate::conference::{Catalog, ConferenceRecord};
use crate::countdown::{Countdown, Urgency};
use crate::deadline::{Clock, next_upcoming_deadline, primary_deadline, upcoming_deadlines};
use crate::filtering::FilterCriteria;
use chrono::{DateTime, Utc};

/// Describe where a conference takes place
///
/// # Returns
/// The venue if known, else "city, country" from whatever parts exist,
/// else "Location TBD"
pub fn location_string(record: &ConferenceRecord) -> String {
    if let Some(ref venue) = record.venue
        && !venue.trim().is_empty()
    {
        return venue.clone();
    }

    let parts: Vec<&str> = [record.city.as_deref(), record.country.as_deref()]
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
        .collect();

    if parts.is_empty() {
        "Location TBD".to_string()
    } else {
        parts.join(", ")
    }
}

/// Short marker for an urgency level
pub fn urgency_marker(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Unknown => " ",
        Urgency::Critical => "!",
        Urgency::Soon => "*",
        Urgency::Relaxed => "-",
    }
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M UTC").to_string()
}

// Countdowns only track deadlines still ahead; an all-past conference shows TBD
fn countdown_target(conf: &ConferenceRecord, clock: &Clock) -> Option<DateTime<Utc>> {
    next_upcoming_deadline(conf, clock).map(|d| d.instant)
}

/// Message shown when no conference survives filtering
pub fn empty_listing_message(criteria: &FilterCriteria) -> &'static str {
    if criteria.include_past {
        "No conferences found"
    } else {
        "No upcoming conferences match the selected filters. \
         Use --include-past to show past conferences"
    }
}

/// One line per conference with the countdown to its next deadline
///
/// Used by the watch mode, which redraws this on every tick.
pub fn format_countdowns(conferences: &[&ConferenceRecord], clock: &Clock) -> String {
    let mut result = String::new();
    for conf in conferences {
        let next = countdown_target(conf, clock);
        result.push_str(&format!(
            "{} {:<16} {}\n",
            urgency_marker(Urgency::of(next, clock.now())),
            conf.title,
            Countdown::between(next, clock.now())
        ));
    }
    result
}

/// Format conferences into a display string
///
/// # Arguments
/// * `conferences` - Conferences in display order
/// * `criteria` - Criteria that produced the list, used for the empty message
/// * `clock` - Reference time for countdowns
///
/// # Returns
/// Formatted string representation of the conferences
pub fn format_conferences(
    conferences: &[&ConferenceRecord],
    criteria: &FilterCriteria,
    clock: &Clock,
) -> String {
    if conferences.is_empty() {
        return empty_listing_message(criteria).to_string();
    }

    let mut result = format!("Found {} conference(s):\n\n", conferences.len());
    for conf in conferences {
        match conf.year {
            Some(year) => result.push_str(&format!("- [{}] {} {}\n", conf.id, conf.title, year)),
            None => result.push_str(&format!("- [{}] {}\n", conf.id, conf.title)),
        }

        if let Some(ref full_name) = conf.full_name {
            result.push_str(&format!("  {}\n", full_name));
        }
        result.push_str(&format!("  Location: {}\n", location_string(conf)));
        if let Some(ref dates) = conf.date {
            result.push_str(&format!("  Dates: {}\n", dates));
        }
        if !conf.tags.is_empty() {
            result.push_str(&format!("  Tags: {}\n", conf.tags.join(", ")));
        }
        if let Some(rating) = conf.rating_key() {
            result.push_str(&format!("  ERA rating: {}\n", rating));
        }

        match primary_deadline(conf, clock) {
            Some(d) => result.push_str(&format!(
                "  Deadline: {} {} ({})\n",
                d.entry.label,
                format_instant(d.instant),
                Countdown::between(countdown_target(conf, clock), clock.now())
            )),
            None => result.push_str("  Deadline: TBD\n"),
        }

        let upcoming = upcoming_deadlines(conf, clock);
        if upcoming.len() > 1 {
            result.push_str("  Upcoming:\n");
            for d in upcoming {
                result.push_str(&format!(
                    "    {}: {}\n",
                    d.entry.label,
                    format_instant(d.instant)
                ));
            }
        }

        if let Some(ref link) = conf.link {
            result.push_str(&format!("  Link: {}\n", link));
        }
    }

    result
}

/// List the available filter choices of a catalog
pub fn format_facets(catalog: &Catalog) -> String {
    let years: Vec<String> = catalog.all_years().iter().map(i32::to_string).collect();
    let mut result = String::new();
    result.push_str(&format!("Tags: {}\n", catalog.all_tags().join(", ")));
    result.push_str(&format!("Countries: {}\n", catalog.all_countries().join(", ")));
    result.push_str(&format!("Years: {}\n", years.join(", ")));
    result.push_str(&format!("Ratings: {}\n", catalog.all_era_ratings().join(", ")));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conference::DeadlineEntry;
    use crate::deadline::Zone;
    use chrono::TimeZone;

    fn clock() -> Clock {
        Clock::fixed(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), Zone::utc())
    }

    #[test]
    fn test_location_string_fallbacks() {
        let mut record = ConferenceRecord::new("c", "C");
        assert_eq!(location_string(&record), "Location TBD");
        record.country = Some("Japan".to_string());
        assert_eq!(location_string(&record), "Japan");
        record.city = Some("Kyoto".to_string());
        assert_eq!(location_string(&record), "Kyoto, Japan");
        record.venue = Some("Kyoto International Conference Center".to_string());
        assert_eq!(location_string(&record), "Kyoto International Conference Center");
    }

    #[test]
    fn test_format_empty() {
        let all = FilterCriteria::new().with_include_past(true);
        assert_eq!(format_conferences(&[], &all, &clock()), "No conferences found");
    }

    #[test]
    fn test_format_empty_hints_at_past_conferences() {
        let text = format_conferences(&[], &FilterCriteria::new(), &clock());
        assert!(text.starts_with("No upcoming conferences match"));
        assert!(text.contains("--include-past"));
    }

    #[test]
    fn test_format_shows_primary_and_upcoming() {
        let record = ConferenceRecord {
            year: Some(2025),
            deadlines: vec![
                DeadlineEntry::new("abstract", "Abstract", "2025-01-03 00:00"),
                DeadlineEntry::new("submission", "Paper", "2025-01-10 00:00"),
            ],
            ..ConferenceRecord::new("iclr25", "ICLR")
        };
        let text = format_conferences(&[&record], &FilterCriteria::new(), &clock());
        assert!(text.starts_with("Found 1 conference(s):"));
        assert!(text.contains("- [iclr25] ICLR 2025"));
        assert!(text.contains("Deadline: Abstract 2025-01-03 00:00 UTC (2d 0h 0m 0s)"));
        assert!(text.contains("    Paper: 2025-01-10 00:00 UTC"));
    }

    #[test]
    fn test_format_countdowns() {
        let record = ConferenceRecord {
            deadline: Some("2025-01-03 00:00".to_string()),
            ..ConferenceRecord::new("a", "A")
        };
        let tbd = ConferenceRecord::new("b", "B");
        let text = format_countdowns(&[&record, &tbd], &clock());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("! A"));
        assert!(lines[0].ends_with("2d 0h 0m 0s"));
        assert!(lines[1].ends_with("TBD"));
    }

    #[test]
    fn test_all_past_conference_counts_down_to_nothing() {
        let record = ConferenceRecord {
            deadline: Some("2024-06-01".to_string()),
            ..ConferenceRecord::new("past", "Past")
        };
        let line = format_countdowns(&[&record], &clock());
        assert_eq!(line, format!("  {:<16} TBD\n", "Past"));

        let all = FilterCriteria::new().with_include_past(true);
        let text = format_conferences(&[&record], &all, &clock());
        assert!(text.contains("Deadline: Paper Submission 2024-06-01 00:00 UTC (TBD)"));
    }
}
