//! Time source used for `generated_at`, `updated_at` and `release_date`.

use chrono::{Local, NaiveDate, Utc};

/// Supplies the current time to manifest and index generation.
pub trait Clock {
    /// Seconds since the unix epoch.
    fn unix_timestamp(&self) -> i64;

    /// Calendar date in the local timezone of the generating machine.
    fn local_date(&self) -> NaiveDate;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }

    fn local_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at one instant, for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    timestamp: i64,
    date: NaiveDate,
}

impl FixedClock {
    /// Freeze the clock at `timestamp`, reporting `date` as the local date.
    pub const fn new(timestamp: i64, date: NaiveDate) -> Self {
        Self { timestamp, date }
    }
}

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.timestamp
    }

    fn local_date(&self) -> NaiveDate {
        self.date
    }
}
