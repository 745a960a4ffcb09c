//! Time source for message footers and headers.
//!
//! Rendering takes the current time from a [`Clock`] so that output is
//! reproducible under test. [`SystemClock`] reads the local wall clock.
//!
//! ```
//! use trendpack::clock::{Clock, FixedClock};
//!
//! let clock = FixedClock::parse("2025-01-15 09:30:00").unwrap();
//! assert_eq!(trendpack::clock::format_time(clock.now()), "2025-01-15 09:30:00");
//! ```

use chrono::{Local, NaiveDateTime};

use crate::error::TrendpackError;

/// Format of every timestamp printed in a message.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current local time.
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Creates a clock frozen at `at`.
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Creates a clock from a `YYYY-MM-DD HH:MM:SS` string.
    pub fn parse(input: &str) -> crate::Result<Self> {
        parse_time(input).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime + Send + Sync,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

/// Formats a timestamp the way messages print it.
pub fn format_time(at: NaiveDateTime) -> String {
    at.format(TIME_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_time(input: &str) -> crate::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), TIME_FORMAT)
        .map_err(|_| TrendpackError::invalid_time(input))
}
