//! Deadline time handling
//!
//! This module turns raw deadline strings into instants and picks the
//! deadlines that matter for a conference:
//! - `zone`: timezone names (IANA, AoE, UTC offsets)
//! - `clock`: explicit "now" plus local zone
//! - `normalize`: date string + zone -> instant
//! - `select`: primary and upcoming deadlines of a record

mod clock;
mod normalize;
mod select;
mod zone;

pub use clock::Clock;
pub use normalize::{TBD, is_tbd, normalize, normalize_with};
pub use select::{
    ResolvedDeadline, has_upcoming_deadlines, next_upcoming_deadline, primary_deadline,
    resolved_deadlines, upcoming_deadlines,
};
pub use zone::Zone;
