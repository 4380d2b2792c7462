//! Notification context test suite.

mod dispatcher_tests;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock returning a programmable instant, for dedup-window tests.
pub(crate) struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub(crate) fn set(&self, now: DateTime<Utc>) {
        *self.now.write().expect("clock lock poisoned") = now;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }
}
