//! Test utilities shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Compiled for tests and behind the `test-support` feature.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{Mutex, MutexGuard};

/// Clock that only moves when a test tells it to.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Starts the clock at `millis` after the Unix epoch.
    pub fn at_millis(millis: i64) -> Self {
        match DateTime::from_timestamp_millis(millis) {
            Some(now) => Self::new(now),
            None => panic!("timestamp out of range: {millis}"),
        }
    }

    pub fn advance_millis(&self, millis: i64) {
        *self.lock_clock() += TimeDelta::milliseconds(millis);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
