//! Deadline countdowns
//!
//! The countdown text and urgency level are pure functions of a deadline and
//! "now". `CountdownTicker` re-evaluates them on a timer; it lives outside the
//! filter/sort pipeline and can be cancelled at any time.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Refresh period of the countdown display
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Time left until a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// No usable deadline
    Tbd,
    /// The deadline is at or before now
    Passed,
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
}

impl Countdown {
    /// Compute the countdown to `deadline` as seen at `now`
    pub fn between(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(deadline) = deadline else {
            return Countdown::Tbd;
        };

        let total = (deadline - now).num_seconds();
        if total <= 0 {
            return Countdown::Passed;
        }

        Countdown::Remaining {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Tbd => write!(f, "TBD"),
            Countdown::Passed => write!(f, "Deadline passed"),
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{}d {}h {}m {}s", days, hours, minutes, seconds),
        }
    }
}

/// How pressing a deadline is, used to color countdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// No usable deadline
    Unknown,
    /// Seven days or less
    Critical,
    /// Thirty days or less
    Soon,
    Relaxed,
}

impl Urgency {
    /// Classify by whole days remaining, rounded up
    pub fn of(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(deadline) = deadline else {
            return Urgency::Unknown;
        };

        let secs = (deadline - now).num_seconds();
        let days_remaining = secs.div_euclid(SECS_PER_DAY)
            + i64::from(secs.rem_euclid(SECS_PER_DAY) != 0);

        if days_remaining <= 7 {
            Urgency::Critical
        } else if days_remaining <= 30 {
            Urgency::Soon
        } else {
            Urgency::Relaxed
        }
    }
}

/// Periodic countdown refresh running on the tokio runtime
///
/// The callback receives the current instant on every tick. Dropping the
/// ticker stops it.
pub struct CountdownTicker {
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Start ticking every `period`; the first tick fires immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(DateTime<Utc>) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick(Utc::now());
            }
        });
        tracing::debug!(?period, "countdown ticker started");
        Self { handle }
    }

    /// Stop the ticker; no callback runs after the current one returns
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Check if the ticker task has stopped
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
