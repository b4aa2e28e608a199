//! Conference filter pipeline
//!
//! Filtering is a conjunction of independent predicates. Every facet that is
//! left empty matches all conferences, so a default `FilterCriteria` keeps
//! the whole list.

use crate::conference::ConferenceRecord;
use crate::deadline::{Clock, has_upcoming_deadlines};
use std::collections::BTreeSet;

/// The user's current filter selection
///
/// Criteria values are replaced rather than mutated: every `with_*` method
/// returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Keep conferences carrying at least one of these tags
    pub tags: BTreeSet<String>,
    /// Keep conferences held in one of these countries
    pub countries: BTreeSet<String>,
    /// Keep conferences of one of these edition years
    pub years: BTreeSet<i32>,
    /// Keep conferences with one of these ERA ratings (upper case)
    pub ratings: BTreeSet<String>,
    /// Case-insensitive substring of title or full name
    pub search_query: String,
    /// Also show conferences whose deadlines have all passed
    pub include_past: bool,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_countries<I, S>(self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_years<I>(self, years: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        Self {
            years: years.into_iter().collect(),
            ..self
        }
    }

    /// Ratings are stored upper-cased so "a*" selects "A*"
    pub fn with_ratings<I, S>(self, ratings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ratings: ratings
                .into_iter()
                .map(|r| r.into().trim().to_uppercase())
                .filter(|r| !r.is_empty())
                .collect(),
            ..self
        }
    }

    pub fn with_search(self, query: &str) -> Self {
        Self {
            search_query: query.to_string(),
            ..self
        }
    }

    pub fn with_include_past(self, include_past: bool) -> Self {
        Self {
            include_past,
            ..self
        }
    }

    /// Toggle a single tag on or off
    pub fn toggle_tag(&self, tag: &str) -> Self {
        let mut tags = self.tags.clone();
        if !tags.remove(tag) {
            tags.insert(tag.to_string());
        }
        Self {
            tags,
            ..self.clone()
        }
    }

    /// Check if no facet narrows the list
    ///
    /// `include_past` is not a facet: with it off, past conferences are
    /// still hidden.
    pub fn is_unfiltered(&self) -> bool {
        self.tags.is_empty()
            && self.countries.is_empty()
            && self.years.is_empty()
            && self.ratings.is_empty()
            && self.search_query.is_empty()
    }

    /// Check a single record against every criterion
    pub fn matches(&self, record: &ConferenceRecord, clock: &Clock) -> bool {
        if !self.include_past && !has_upcoming_deadlines(record, clock) {
            return false;
        }

        matches_tags(record, &self.tags)
            && matches_country(record, &self.countries)
            && matches_year(record, &self.years)
            && matches_rating(record, &self.ratings)
            && matches_search(record, &self.search_query)
    }
}

/// Tag facet: empty set, or at least one shared tag
pub fn matches_tags(record: &ConferenceRecord, tags: &BTreeSet<String>) -> bool {
    tags.is_empty() || tags.iter().any(|tag| record.has_tag(tag))
}

/// Country facet: empty set, or the record's country is selected
pub fn matches_country(record: &ConferenceRecord, countries: &BTreeSet<String>) -> bool {
    countries.is_empty()
        || record
            .country
            .as_ref()
            .map(|c| countries.contains(c))
            .unwrap_or(false)
}

/// Year facet: empty set, or the record's year is selected
pub fn matches_year(record: &ConferenceRecord, years: &BTreeSet<i32>) -> bool {
    years.is_empty() || record.year.is_some_and(|y| years.contains(&y))
}

/// Rating facet: empty set, or the upper-cased rating is selected
pub fn matches_rating(record: &ConferenceRecord, ratings: &BTreeSet<String>) -> bool {
    ratings.is_empty()
        || record
            .rating_key()
            .map(|r| ratings.contains(&r))
            .unwrap_or(false)
}

/// Search: empty query, or case-insensitive substring of title or full name
pub fn matches_search(record: &ConferenceRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query_lower = query.to_lowercase();

    let title_matches = record.title.to_lowercase().contains(&query_lower);

    let full_name_matches = record
        .full_name
        .as_ref()
        .map(|n| n.to_lowercase().contains(&query_lower))
        .unwrap_or(false);

    title_matches || full_name_matches
}

/// Keep the records matching `criteria`, in input order
///
/// # Arguments
/// * `records` - Conferences to filter
/// * `criteria` - Current filter selection
/// * `clock` - Reference time for the past/upcoming decision
pub fn filter_conferences<'a, I>(
    records: I,
    criteria: &FilterCriteria,
    clock: &Clock,
) -> Vec<&'a ConferenceRecord>
where
    I: IntoIterator<Item = &'a ConferenceRecord>,
{
    records
        .into_iter()
        .filter(|record| criteria.matches(record, clock))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conference::DeadlineEntry;
    use crate::deadline::Zone;
    use chrono::{TimeZone, Utc};

    fn clock() -> Clock {
        Clock::fixed(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), Zone::utc())
    }

    fn upcoming(id: &str, title: &str) -> ConferenceRecord {
        ConferenceRecord {
            deadlines: vec![DeadlineEntry::new("submission", "Paper", "2025-06-01 23:59")],
            ..ConferenceRecord::new(id, title)
        }
    }

    #[test]
    fn test_empty_criteria_keep_everything_upcoming() {
        let records = vec![upcoming("a", "A"), upcoming("b", "B")];
        let kept = filter_conferences(&records, &FilterCriteria::new(), &clock());
        assert_eq!(kept.len(), 2);
        assert!(FilterCriteria::new().is_unfiltered());
    }

    #[test]
    fn test_past_hidden_unless_included() {
        let past = ConferenceRecord {
            deadline: Some("2024-06-01".to_string()),
            ..ConferenceRecord::new("old", "Old")
        };
        let tbd = ConferenceRecord {
            deadline: Some("TBD".to_string()),
            ..ConferenceRecord::new("tbd", "Tbd")
        };
        let records = vec![past, tbd, upcoming("new", "New")];

        let hidden = filter_conferences(&records, &FilterCriteria::new(), &clock());
        assert_eq!(hidden.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["new"]);

        let shown = filter_conferences(
            &records,
            &FilterCriteria::new().with_include_past(true),
            &clock(),
        );
        assert_eq!(shown.len(), 3);
    }

    #[test]
    fn test_missing_fields_never_match_a_facet() {
        let bare = upcoming("bare", "Bare");
        let c = clock();
        assert!(!FilterCriteria::new().with_countries(["Japan"]).matches(&bare, &c));
        assert!(!FilterCriteria::new().with_years([2025]).matches(&bare, &c));
        assert!(!FilterCriteria::new().with_ratings(["A"]).matches(&bare, &c));
        assert!(!FilterCriteria::new().with_tags(["robotics"]).matches(&bare, &c));
    }

    #[test]
    fn test_ratings_are_case_insensitive() {
        let record = ConferenceRecord {
            era_rating: Some("a*".to_string()),
            ..upcoming("r", "R")
        };
        let criteria = FilterCriteria::new().with_ratings(["A*"]);
        assert!(criteria.matches(&record, &clock()));
        let lower = FilterCriteria::new().with_ratings(["a*"]);
        assert_eq!(lower.ratings.iter().next().map(String::as_str), Some("A*"));
    }

    #[test]
    fn test_search_matches_title_or_full_name() {
        let record = ConferenceRecord {
            full_name: Some("International Conference on Robotics and Automation".to_string()),
            ..upcoming("icra", "ICRA")
        };
        let c = clock();
        assert!(FilterCriteria::new().with_search("icr").matches(&record, &c));
        assert!(FilterCriteria::new().with_search("ROBOTICS").matches(&record, &c));
        assert!(!FilterCriteria::new().with_search("vision").matches(&record, &c));
    }

    #[test]
    fn test_toggle_tag_returns_new_value() {
        let original = FilterCriteria::new().with_tags(["ml"]);
        let toggled = original.toggle_tag("cv");
        assert_eq!(original.tags.len(), 1);
        assert_eq!(toggled.tags.len(), 2);
        assert!(toggled.toggle_tag("ml").tags.contains("cv"));
        assert!(!toggled.toggle_tag("ml").tags.contains("ml"));
    }
}
