//! Wall-clock access, reduced to calendar dates in a fixed-offset timezone.
//!
//! Renewal decisions only need "today", but the day boundary depends on the
//! timezone the owner lives in. Dates are computed in a timezone ahead (east)
//! of UTC by a number of minutes; for Beijing time (UTC+8) that is `480`.

use chrono::{DateTime, Duration, Utc};

use crate::date::Date;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current date in the timezone `tz_offset_minutes` minutes
    /// ahead of UTC.
    ///
    /// # Example
    ///
    /// ```
    /// use abonilo::clock::{Clock, FixedClock};
    ///
    /// let clock = FixedClock("2023-01-21T16:00:00Z".parse().unwrap());
    /// assert_eq!("2023-01-21", clock.today(0).iso_gregorian());
    /// assert_eq!("2023-01-22", clock.today(480).iso_gregorian());
    /// ```
    fn today(&self, tz_offset_minutes: i32) -> Date {
        let local = self.now() + Duration::minutes(tz_offset_minutes as i64);
        Date::from(local.date_naive())
    }
}

/// The system clock.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a given instant.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
