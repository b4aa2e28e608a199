//! URL query-string codec for filter state
//!
//! The listing page keeps its facet selection in the address bar so that a
//! filtered view can be shared. Each facet is one parameter holding a
//! comma-separated list, e.g. `?tags=computer-vision,robotics&years=2025`.
//! Search text and the past-conference toggle are not part of the URL.

use crate::filtering::FilterCriteria;
use std::collections::BTreeSet;
use url::form_urlencoded;

pub const TAGS_PARAM: &str = "tags";
pub const COUNTRIES_PARAM: &str = "countries";
pub const YEARS_PARAM: &str = "years";
pub const RATINGS_PARAM: &str = "ratings";

/// Facet parameters in the order they are written
const FACET_PARAMS: [&str; 4] = [TAGS_PARAM, COUNTRIES_PARAM, YEARS_PARAM, RATINGS_PARAM];

/// Comma-joined value of a facet, None when the facet is empty
fn facet_value(criteria: &FilterCriteria, param: &str) -> Option<String> {
    let joined = match param {
        TAGS_PARAM => join(&criteria.tags),
        COUNTRIES_PARAM => join(&criteria.countries),
        YEARS_PARAM => join(&criteria.years),
        RATINGS_PARAM => join(&criteria.ratings),
        _ => String::new(),
    };
    (!joined.is_empty()).then_some(joined)
}

fn join<T: ToString>(values: &BTreeSet<T>) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// Items are kept verbatim; only empty ones are dropped
fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter(|v| !v.is_empty())
}

/// Encode the facet selection as a query string (without leading '?')
///
/// Empty facets are omitted; values are written in sorted order.
pub fn encode_query(criteria: &FilterCriteria) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for param in FACET_PARAMS {
        if let Some(value) = facet_value(criteria, param) {
            serializer.append_pair(param, &value);
        }
    }
    serializer.finish()
}

/// Decode facet parameters from a query string
///
/// A leading '?' is accepted. Unknown parameters, empty list items and
/// non-numeric years are ignored. When a parameter repeats, the first
/// occurrence is used. Search text and the past toggle keep their defaults.
pub fn decode_query(query: &str) -> FilterCriteria {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut criteria = FilterCriteria::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let key: &str = &key;
        if !FACET_PARAMS.contains(&key) || !seen.insert(key.to_string()) {
            continue;
        }
        criteria = match key {
            TAGS_PARAM => criteria.with_tags(split_list(&value)),
            COUNTRIES_PARAM => criteria.with_countries(split_list(&value)),
            YEARS_PARAM => {
                criteria.with_years(split_list(&value).filter_map(|y| y.trim().parse::<i32>().ok()))
            }
            RATINGS_PARAM => criteria.with_ratings(split_list(&value)),
            _ => criteria,
        };
    }

    criteria
}

/// Write the facet selection into an existing query string
///
/// Facet parameters are replaced in place or removed when the facet is
/// empty; facets not present yet are appended. All other parameters are
/// kept in their original order.
pub fn merge_query(existing: &str, criteria: &FilterCriteria) -> String {
    let existing = existing.strip_prefix('?').unwrap_or(existing);
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut written: BTreeSet<&str> = BTreeSet::new();

    for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
        match FACET_PARAMS.iter().copied().find(|p| *p == &*key) {
            Some(param) => {
                if written.insert(param)
                    && let Some(new_value) = facet_value(criteria, param)
                {
                    serializer.append_pair(param, &new_value);
                }
            }
            None => {
                serializer.append_pair(&key, &value);
            }
        }
    }

    for param in FACET_PARAMS {
        if !written.contains(param)
            && let Some(value) = facet_value(criteria, param)
        {
            serializer.append_pair(param, &value);
        }
    }

    serializer.finish()
}
