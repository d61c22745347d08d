//! Unit tests for task lifecycle management.

mod domain_tests;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to one instant so timestamps are predictable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// 2026-10-16 09:30:00 UTC.
    pub(super) fn standard() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
                .single()
                .expect("valid fixed instant"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
