//! Test clock — deterministic `Clock` implementation for tests.

use chrono::{DateTime, TimeDelta, Utc};
use evidence_core::clock::Clock;

/// The instant every test treats as "now": 2026-01-15 10:00:00 UTC.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::seconds(1_768_471_200)
}

/// A clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixed_now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
