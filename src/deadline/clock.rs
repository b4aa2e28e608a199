use super::zone::Zone;
use chrono::{DateTime, Utc};

/// The reference point for every time-dependent decision
///
/// Deciding whether a deadline is upcoming needs "now", and interpreting a
/// deadline without a timezone needs the viewer's local zone. Both are carried
/// explicitly so the pipeline stays deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: DateTime<Utc>,
    local: Zone,
}

impl Clock {
    /// Current time in the process local zone
    pub fn system() -> Self {
        Self {
            now: Utc::now(),
            local: Zone::Local,
        }
    }

    /// A clock frozen at `now`, with `local` as the fallback zone
    pub fn fixed(now: DateTime<Utc>, local: Zone) -> Self {
        Self { now, local }
    }

    /// Same clock with a different local zone
    pub fn with_local(self, local: Zone) -> Self {
        Self { local, ..self }
    }

    /// Same local zone at a new instant
    pub fn at(self, now: DateTime<Utc>) -> Self {
        Self { now, ..self }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn local(&self) -> &Zone {
        &self.local
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}
