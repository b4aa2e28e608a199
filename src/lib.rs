//! Conference Deadlines Library
//!
//! This library filters and orders academic conference listings by their
//! submission deadlines. It turns heterogeneous deadline data (named
//! timezones, "AoE", "TBD" placeholders, legacy single-field deadlines) into
//! comparable instants, and exposes the listing pipeline as pure functions.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Application Layer**: `DeadlineBoard` - Owns a loaded catalog and serves listings
//! - **Domain Layer**: `deadline`, `filtering`, `sorting` - Pure listing pipeline
//! - **Persistence Layer**: `storage` module - Read-only TOML/JSON catalog files
//!
//! # Example
//!
//! ```no_run
//! use conf_deadlines::{DeadlineBoard, FilterCriteria};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let board = DeadlineBoard::new("conferences.toml")?;
//!     let criteria = FilterCriteria::new().with_tags(["machine-learning"]);
//!     for conf in board.list(&criteria) {
//!         println!("{}", conf.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod conference;
pub mod countdown;
pub mod deadline;
pub mod filtering;
pub mod formatting;
pub mod query;
pub mod sorting;
pub mod storage;
pub mod validation;

use anyhow::Result;

// Re-export commonly used types
pub use conference::{Catalog, ConferenceRecord, DeadlineEntry};
pub use countdown::{Countdown, CountdownTicker, Urgency};
pub use deadline::{Clock, ResolvedDeadline, Zone};
pub use filtering::FilterCriteria;
pub use storage::{Storage, StorageError};

/// A loaded conference catalog ready to be listed
///
/// The board reads its catalog once and never writes it back. Every listing
/// call recomputes filtering and ordering from scratch, so the same board can
/// serve any number of criteria values.
pub struct DeadlineBoard {
    pub(crate) catalog: Catalog,
    pub(crate) storage: Storage,
    pub(crate) local: Zone,
}

impl DeadlineBoard {
    /// Create a new board from a catalog file
    ///
    /// # Arguments
    /// * `catalog_path` - Path to the catalog (TOML, or JSON by `.json` extension)
    ///
    /// # Returns
    /// Result containing the board or an error
    ///
    /// # Example
    /// ```no_run
    /// # use conf_deadlines::DeadlineBoard;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let board = DeadlineBoard::new("conferences.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(catalog_path: &str) -> Result<Self> {
        let storage = Storage::new(catalog_path);
        let catalog = storage.load()?;
        Ok(Self {
            catalog,
            storage,
            local: Zone::Local,
        })
    }

    /// Use `local` instead of the process zone for deadlines without a timezone
    pub fn with_local_zone(mut self, local: Zone) -> Self {
        self.local = local;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current time in the board's local zone
    pub fn clock(&self) -> Clock {
        Clock::system().with_local(self.local)
    }

    /// Re-read the catalog file, keeping the old catalog if loading fails
    pub fn reload(&mut self) -> Result<()> {
        self.catalog = self.storage.load()?;
        Ok(())
    }

    /// Filter and sort the catalog as of now
    pub fn list(&self, criteria: &FilterCriteria) -> Vec<&ConferenceRecord> {
        self.list_at(criteria, &self.clock())
    }

    /// Filter and sort the catalog as of `clock`
    pub fn list_at(&self, criteria: &FilterCriteria, clock: &Clock) -> Vec<&ConferenceRecord> {
        let listed = sorting::list_conferences(self.catalog.conferences(), criteria, clock);
        tracing::debug!(
            total = self.catalog.len(),
            listed = listed.len(),
            "filtered conference listing"
        );
        listed
    }

    /// Render the listing as text
    pub fn render(&self, criteria: &FilterCriteria, clock: &Clock) -> String {
        formatting::format_conferences(&self.list_at(criteria, clock), criteria, clock)
    }

    /// Shareable query string for `criteria`
    pub fn share_query(&self, criteria: &FilterCriteria) -> String {
        query::encode_query(criteria)
    }
}
