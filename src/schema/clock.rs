//! Source of the current time for DATETIME components.
//!
//! The schema asks its clock for "now" at most once per cached instant, so a
//! [`FixedClock`] makes datetime rendering fully deterministic in tests.

use std::fmt;

use chrono::{Local, NaiveDateTime};

/// Supplies the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Wrapper so schemas holding a boxed clock can still derive `Debug`.
pub(crate) struct BoxedClock(pub(crate) Box<dyn Clock>);

impl fmt::Debug for BoxedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Clock")
    }
}
