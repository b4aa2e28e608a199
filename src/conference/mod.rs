//! Conference domain models
//!
//! - `record`: conference records and their deadline entries
//! - `catalog`: the ordered list of records and facet extraction
//! - `serde_impl`: catalog file shapes (TOML tables, JSON arrays)

mod catalog;
mod record;
mod serde_impl;

pub use catalog::{Catalog, FORMAT_VERSION};
pub use record::{ConferenceRecord, DeadlineEntry};
