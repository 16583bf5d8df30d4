//! Sources of "now" for the tick driver.
//!
//! The engine itself never reads the clock; callers pass the instant to
//! [`SalaryEngine::tick`](crate::SalaryEngine::tick). A [`Clock`] lets the
//! driver be run against the host clock in production and a hand-set clock
//! in tests.

use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDateTime, TimeDelta};

pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(
        &self,
        instant: NaiveDateTime,
    ) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    pub fn advance(
        &self,
        by: TimeDelta,
    ) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
