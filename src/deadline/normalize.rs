//! Deadline normalization
//!
//! Turns the raw `date` string of a deadline plus an optional timezone name
//! into a single comparable instant. Anything that cannot be interpreted
//! degrades to `None`; nothing here returns an error.

use super::zone::Zone;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Sentinel used by conference data for "not announced yet"
pub const TBD: &str = "TBD";

/// Wall-clock layouts accepted for deadlines without an explicit offset
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Check if a date value is the "to be determined" sentinel or blank
pub fn is_tbd(date: &str) -> bool {
    let trimmed = date.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(TBD)
}

/// Normalize a deadline using the process local zone as fallback
///
/// # Arguments
/// * `date` - Raw date value (e.g., "2025-05-15 23:59:59", "TBD")
/// * `timezone` - Optional timezone name (e.g., "AoE", "UTC-12")
///
/// # Returns
/// The absolute instant, or None for TBD, blank, or unparseable input
pub fn normalize(date: &str, timezone: Option<&str>) -> Option<DateTime<Utc>> {
    normalize_with(date, timezone, &Zone::Local)
}

/// Normalize a deadline, interpreting zone-less times in `local`
///
/// A timezone name that cannot be resolved is ignored and `local` is used.
/// An explicit UTC offset inside `date` takes precedence over any zone.
pub fn normalize_with(date: &str, timezone: Option<&str>, local: &Zone) -> Option<DateTime<Utc>> {
    if is_tbd(date) {
        return None;
    }
    let date = date.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(date) {
        return Some(with_offset.with_timezone(&Utc));
    }

    let Some(naive) = parse_naive(date) else {
        tracing::debug!(date, "ignoring unparseable deadline");
        return None;
    };

    let zone = match timezone.filter(|tz| !tz.trim().is_empty()) {
        Some(name) => Zone::parse(name).unwrap_or_else(|| {
            tracing::debug!(timezone = name, "unknown timezone, using local zone");
            *local
        }),
        None => *local,
    };

    zone.resolve(&naive)
}

/// Parse a wall-clock timestamp; a bare date means midnight
fn parse_naive(date: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_tbd_and_blank_are_none() {
        assert_eq!(normalize_with("TBD", None, &Zone::utc()), None);
        assert_eq!(normalize_with(" tbd ", Some("AoE"), &Zone::utc()), None);
        assert_eq!(normalize_with("", None, &Zone::utc()), None);
        assert_eq!(normalize_with("   ", None, &Zone::utc()), None);
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(normalize_with("next spring", None, &Zone::utc()), None);
        assert_eq!(normalize_with("2025-13-45", None, &Zone::utc()), None);
        assert_eq!(normalize_with("2025-02-30 10:00", Some("UTC"), &Zone::utc()), None);
    }

    #[test]
    fn test_accepted_layouts() {
        let expected = utc("2025-05-15T23:59:00Z");
        for raw in [
            "2025-05-15 23:59",
            "2025-05-15T23:59",
            "2025-05-15 23:59:00",
            "2025-05-15T23:59:00",
            "2025-05-15T23:59:00.000",
        ] {
            assert_eq!(normalize_with(raw, None, &Zone::utc()), Some(expected), "{raw}");
        }
        assert_eq!(
            normalize_with("2025-05-15", None, &Zone::utc()),
            Some(utc("2025-05-15T00:00:00Z"))
        );
    }

    #[test]
    fn test_timezone_applied_to_wall_clock() {
        assert_eq!(
            normalize_with("2025-05-15 23:59:59", Some("AoE"), &Zone::utc()),
            Some(utc("2025-05-16T11:59:59Z"))
        );
        assert_eq!(
            normalize_with("2025-05-15 08:00:00", Some("UTC+8"), &Zone::utc()),
            Some(utc("2025-05-15T00:00:00Z"))
        );
    }

    #[test]
    fn test_explicit_offset_beats_timezone() {
        assert_eq!(
            normalize_with("2025-05-15T12:00:00+02:00", Some("AoE"), &Zone::utc()),
            Some(utc("2025-05-15T10:00:00Z"))
        );
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_local() {
        let local = Zone::parse("UTC+1").unwrap();
        assert_eq!(
            normalize_with("2025-05-15 12:00", Some("Atlantis/Capital"), &local),
            Some(utc("2025-05-15T11:00:00Z"))
        );
    }

    #[test]
    fn test_malformed_offset_falls_back_to_local_zone() {
        assert_eq!(
            normalize_with("2025-05-15 12:00", Some("UTC+1é1"), &Zone::utc()),
            Some(utc("2025-05-15T12:00:00Z"))
        );
    }

    #[test]
    fn test_out_of_range_wall_clock_is_none() {
        assert_eq!(normalize_with("+262142-12-31 23:30", Some("AoE"), &Zone::utc()), None);
    }
}
