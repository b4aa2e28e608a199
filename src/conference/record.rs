use crate::deadline::Zone;
use serde::{Deserialize, Deserializer};

// Hand-edited JSON writes `null` for absent lists and strings
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single dated milestone of a conference (abstract, submission, rebuttal, ...)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DeadlineEntry {
    /// Machine-readable kind (e.g., "abstract", "submission")
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Human-readable label (e.g., "Paper Submission")
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    /// Wall-clock date string, or "TBD"
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    /// Optional timezone overriding the conference timezone
    pub timezone: Option<String>,
}

impl DeadlineEntry {
    /// Create an entry without its own timezone
    pub fn new(kind: &str, label: &str, date: &str) -> Self {
        Self {
            kind: kind.to_string(),
            label: label.to_string(),
            date: date.to_string(),
            timezone: None,
        }
    }

    /// Same entry with an explicit timezone
    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }
}

/// A conference as supplied by the catalog
///
/// Everything except `id` and `title` is optional because conference data
/// is hand-maintained and frequently incomplete. Records are never mutated
/// by the listing pipeline.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ConferenceRecord {
    /// Stable identifier (e.g., "neurips25")
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Short title (e.g., "NeurIPS")
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Optional full name (e.g., "Conference on Neural Information Processing Systems")
    pub full_name: Option<String>,
    /// Edition year
    pub year: Option<i32>,
    /// Category tags (e.g., "machine-learning", "computer-vision")
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub venue: Option<String>,
    /// Event dates as free text (e.g., "December 9-15, 2025")
    pub date: Option<String>,
    pub link: Option<String>,
    /// ERA quality rating (e.g., "A*", "a", "B"), compared case-insensitively
    pub era_rating: Option<String>,
    /// Fallback timezone for deadlines that do not name their own
    pub timezone: Option<String>,
    /// Legacy single submission deadline, used only when `deadlines` is empty
    pub deadline: Option<String>,
    /// Legacy abstract deadline, used only when `deadlines` is empty
    pub abstract_deadline: Option<String>,
    /// Structured deadlines
    #[serde(deserialize_with = "null_as_default")]
    pub deadlines: Vec<DeadlineEntry>,
}

impl ConferenceRecord {
    /// Create a minimal record
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// All deadline entries of this conference, in declaration order
    ///
    /// Older catalog entries only carry `abstract_deadline` and `deadline`.
    /// Those are expanded into entries (abstract first) when no structured
    /// `deadlines` are present.
    pub fn all_deadlines(&self) -> Vec<DeadlineEntry> {
        if !self.deadlines.is_empty() {
            return self.deadlines.clone();
        }

        let mut entries = Vec::new();
        if let Some(ref date) = self.abstract_deadline {
            entries.push(DeadlineEntry::new("abstract", "Abstract Deadline", date));
        }
        if let Some(ref date) = self.deadline {
            entries.push(DeadlineEntry::new("submission", "Paper Submission", date));
        }
        entries
    }

    /// Timezone name in effect for an entry
    ///
    /// The entry's own timezone wins when it names a known zone, otherwise
    /// the record's timezone applies.
    pub fn timezone_for<'a>(&'a self, entry: &'a DeadlineEntry) -> Option<&'a str> {
        entry
            .timezone
            .as_deref()
            .filter(|tz| Zone::parse(tz).is_some())
            .or(self.timezone.as_deref())
    }

    /// Check if the record carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// ERA rating normalized to upper case
    pub fn rating_key(&self) -> Option<String> {
        self.era_rating
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_uppercase)
    }

    /// Derive an identifier from the title and year (e.g., "neurips-2025")
    pub fn derived_id(&self) -> String {
        let slug: Vec<String> = self
            .title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect();
        match self.year {
            Some(year) => format!("{}-{}", slug.join("-"), year),
            None => slug.join("-"),
        }
    }
}
