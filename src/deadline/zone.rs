use chrono::{
    DateTime, FixedOffset, Local, MappedLocalTime, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Offset used by "Anywhere on Earth" deadlines (UTC-12)
const AOE_OFFSET_SECS: i32 = -12 * 3600;

/// A timezone in which a deadline's wall-clock time is interpreted
///
/// Conference data mixes IANA zone names ("America/New_York"), the
/// "Anywhere on Earth" convention ("AoE") and fixed offsets ("UTC+8").
/// All of them are folded into this one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The zone of the running process
    Local,
    /// A fixed offset from UTC (AoE, UTC+8, GMT-03:30, ...)
    Fixed(FixedOffset),
    /// An IANA timezone with daylight saving rules
    Named(Tz),
}

impl Zone {
    /// UTC as a fixed zone
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    /// Resolve a timezone name, returning None for names that are not recognized
    ///
    /// # Arguments
    /// * `name` - Timezone name (e.g., "AoE", "UTC-12", "Europe/Berlin")
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        if name.eq_ignore_ascii_case("aoe") {
            return FixedOffset::east_opt(AOE_OFFSET_SECS).map(Zone::Fixed);
        }

        if let Some(offset) = parse_utc_offset(name) {
            return Some(Zone::Fixed(offset));
        }

        name.parse::<Tz>().ok().map(Zone::Named)
    }

    /// Convert a wall-clock time in this zone to an absolute instant
    ///
    /// Ambiguous times (DST fall-back) take the earliest instant. Times that
    /// fall inside a DST gap are shifted forward by one hour.
    pub fn resolve(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Local => resolve_in(&Local, naive),
            Zone::Fixed(offset) => resolve_in(offset, naive),
            Zone::Named(tz) => resolve_in(tz, naive),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::parse(s).ok_or_else(|| {
            format!(
                "Unknown timezone '{}'. Use an IANA name (e.g., 'Europe/Berlin'), 'AoE', or an offset like 'UTC+8'",
                s
            )
        })
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => write!(f, "local"),
            Zone::Fixed(offset) => write!(f, "UTC{}", offset),
            Zone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

fn resolve_in<Z: TimeZone>(zone: &Z, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    let earliest = |local: MappedLocalTime<DateTime<Z>>| local.earliest();
    earliest(zone.from_local_datetime(naive))
        .or_else(|| {
            naive
                .checked_add_signed(TimeDelta::hours(1))
                .and_then(|shifted| earliest(zone.from_local_datetime(&shifted)))
        })
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse "UTC", "GMT", "Z" and offsets like "UTC+8", "UTC-03:30", "GMT+0530"
fn parse_utc_offset(name: &str) -> Option<FixedOffset> {
    let upper = name.to_ascii_uppercase();
    if upper == "Z" {
        return Some(Utc.fix());
    }

    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))?;
    if rest.is_empty() {
        return Some(Utc.fix());
    }

    let (sign, digits) = match rest.as_bytes()[0] {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };

    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = if let Some((h, m)) = digits.split_once(':') {
        (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?)
    } else if digits.len() == 4 {
        (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?)
    } else {
        (digits.parse::<i32>().ok()?, 0)
    };

    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_aoe_is_utc_minus_12() {
        let zone = Zone::parse("AoE").unwrap();
        assert_eq!(zone, Zone::Fixed(FixedOffset::west_opt(12 * 3600).unwrap()));
        assert_eq!(Zone::parse("aoe"), Some(zone));
    }

    #[test]
    fn test_parse_utc_offsets() {
        assert_eq!(Zone::parse("UTC"), Some(Zone::utc()));
        assert_eq!(Zone::parse("GMT"), Some(Zone::utc()));
        assert_eq!(
            Zone::parse("UTC+8"),
            Some(Zone::Fixed(FixedOffset::east_opt(8 * 3600).unwrap()))
        );
        assert_eq!(
            Zone::parse("UTC-03:30"),
            Some(Zone::Fixed(FixedOffset::west_opt(3 * 3600 + 1800).unwrap()))
        );
        assert_eq!(
            Zone::parse("gmt+0530"),
            Some(Zone::Fixed(FixedOffset::east_opt(5 * 3600 + 1800).unwrap()))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Zone::parse(""), None);
        assert_eq!(Zone::parse("UTC+99"), None);
        assert_eq!(Zone::parse("Mars/Olympus_Mons"), None);
        assert!("nowhere".parse::<Zone>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_ascii_offset() {
        assert_eq!(Zone::parse("UTC+1é1"), None);
        assert_eq!(Zone::parse("GMT-é"), None);
        assert_eq!(Zone::parse("UTC+０８"), None);
    }

    #[test]
    fn test_resolve_named_zone_uses_dst() {
        let zone = Zone::parse("America/Chicago").unwrap();
        // February is CST (UTC-6), July is CDT (UTC-5)
        let winter = zone.resolve(&noon(2026, 2, 20)).unwrap();
        let summer = zone.resolve(&noon(2026, 7, 20)).unwrap();
        assert_eq!(winter.to_rfc3339(), "2026-02-20T18:00:00+00:00");
        assert_eq!(summer.to_rfc3339(), "2026-07-20T17:00:00+00:00");
    }

    #[test]
    fn test_resolve_dst_gap_shifts_forward() {
        let zone = Zone::parse("Europe/Berlin").unwrap();
        // 02:30 does not exist on 2025-03-30 in Berlin
        let gap = NaiveDate::from_ymd_opt(2025, 3, 30)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let resolved = zone.resolve(&gap).unwrap();
        assert_eq!(resolved.to_rfc3339(), "2025-03-30T01:30:00+00:00");
    }

    #[test]
    fn test_resolve_at_end_of_range_is_none() {
        let last = NaiveDateTime::MAX - TimeDelta::minutes(30);
        assert_eq!(Zone::parse("AoE").unwrap().resolve(&last), None);
    }
}
