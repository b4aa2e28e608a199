//! Deserialization of Catalog
//!
//! Catalog files come in several shapes:
//! - TOML with `[[conference]]` tables and an optional `format_version`
//! - JSON with a top-level array of records
//! - JSON with an object holding a `conferences` array
//!
//! All of them deserialize into the same Catalog. The shape is picked from
//! the document itself, so a malformed record reports its own error.

use super::catalog::{Catalog, FORMAT_VERSION};
use super::record::ConferenceRecord;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a list of conferences or a table with a `conference` list")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Catalog, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut conferences = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(record) = seq.next_element::<ConferenceRecord>()? {
            conferences.push(record);
        }
        Ok(Catalog {
            format_version: FORMAT_VERSION,
            conferences,
        })
    }

    fn visit_map<A>(self, mut map: A) -> Result<Catalog, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut format_version = None;
        let mut conferences: Option<Vec<ConferenceRecord>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "format_version" => {
                    format_version = map.next_value::<Option<u32>>()?;
                }
                "conference" | "conferences" => {
                    if conferences.is_some() {
                        return Err(de::Error::duplicate_field("conference"));
                    }
                    conferences = Some(map.next_value::<Option<Vec<_>>>()?.unwrap_or_default());
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(Catalog {
            format_version: format_version.unwrap_or(FORMAT_VERSION),
            conferences: conferences.unwrap_or_default(),
        })
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut catalog = deserializer.deserialize_any(CatalogVisitor)?;
        catalog.fill_missing_ids();
        Ok(catalog)
    }
}
