use super::record::ConferenceRecord;
use std::collections::BTreeSet;

/// Current catalog file format version
pub const FORMAT_VERSION: u32 = 1;

/// The full, ordered list of conferences loaded from a catalog file
///
/// Vec keeps the load order, which is also the tie-break order of the
/// deadline sort. The catalog is read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Format version of the catalog file
    pub format_version: u32,

    pub(crate) conferences: Vec<ConferenceRecord>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            conferences: Vec::new(),
        }
    }
}

// Deserialize implementation is in serde_impl.rs

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from records, filling in missing identifiers
    pub fn from_records(conferences: Vec<ConferenceRecord>) -> Self {
        let mut catalog = Self {
            conferences,
            ..Self::default()
        };
        catalog.fill_missing_ids();
        catalog
    }

    /// All conferences in load order
    pub fn conferences(&self) -> &[ConferenceRecord] {
        &self.conferences
    }

    pub fn len(&self) -> usize {
        self.conferences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conferences.is_empty()
    }

    /// Find a conference by its ID
    pub fn find_by_id(&self, id: &str) -> Option<&ConferenceRecord> {
        self.conferences.iter().find(|c| c.id == id)
    }

    /// Distinct edition years, newest first
    pub fn all_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.conferences.iter().filter_map(|c| c.year).collect();
        years.into_iter().rev().collect()
    }

    /// Distinct ERA ratings, upper-cased and sorted
    pub fn all_era_ratings(&self) -> Vec<String> {
        let ratings: BTreeSet<String> = self
            .conferences
            .iter()
            .filter_map(|c| c.rating_key())
            .collect();
        ratings.into_iter().collect()
    }

    /// Distinct countries, sorted
    pub fn all_countries(&self) -> Vec<String> {
        let countries: BTreeSet<String> = self
            .conferences
            .iter()
            .filter_map(|c| c.country.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        countries.into_iter().collect()
    }

    /// Distinct tags, sorted
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .conferences
            .iter()
            .flat_map(|c| c.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(str::to_string).collect()
    }

    /// Give records without an ID one derived from title and year
    pub(crate) fn fill_missing_ids(&mut self) {
        for record in self.conferences.iter_mut() {
            if record.id.trim().is_empty() {
                record.id = record.derived_id();
                tracing::debug!(id = %record.id, "derived missing conference id");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_records(vec![
            ConferenceRecord {
                year: Some(2024),
                era_rating: Some("a".to_string()),
                country: Some("Canada".to_string()),
                tags: vec!["machine-learning".to_string()],
                ..ConferenceRecord::new("a", "A")
            },
            ConferenceRecord {
                year: Some(2025),
                era_rating: Some("A*".to_string()),
                country: Some("Austria".to_string()),
                tags: vec!["computer-vision".to_string(), "machine-learning".to_string()],
                ..ConferenceRecord::new("b", "B")
            },
            ConferenceRecord {
                year: Some(2025),
                era_rating: Some("A".to_string()),
                ..ConferenceRecord::new("", "Some Workshop")
            },
        ])
    }

    #[test]
    fn test_facets() {
        let catalog = sample();
        assert_eq!(catalog.all_years(), vec![2025, 2024]);
        assert_eq!(catalog.all_era_ratings(), vec!["A", "A*"]);
        assert_eq!(catalog.all_countries(), vec!["Austria", "Canada"]);
        assert_eq!(catalog.all_tags(), vec!["computer-vision", "machine-learning"]);
    }

    #[test]
    fn test_missing_ids_are_derived() {
        let catalog = sample();
        assert!(catalog.find_by_id("some-workshop-2025").is_some());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.all_years().is_empty());
        assert_eq!(catalog.format_version, FORMAT_VERSION);
    }
}
