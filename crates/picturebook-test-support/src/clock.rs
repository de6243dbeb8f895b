//! Deterministic `Clock` implementations for tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use picturebook_core::clock::{Clock, millis};

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock the test moves forward by hand.
///
/// Clones share the same time, so a test can keep one handle while the
/// reader under test owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Starts the clock at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `ms` milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn advance(&self, ms: u64) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += millis(ms);
    }

    /// Sets the clock to `at`.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().expect("clock mutex poisoned") = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}
