//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::period::{Period, PeriodUnit};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar,
/// and ends with the Gregorian year 9999. Gregorian dates are proleptic
/// Gregorian.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

/// Julian day number of 0001-01-01 minus one, i.e. the offset between a JDN
/// and chrono's "days from CE".
const CE_OFFSET: i32 = 1_721_425;

/// Last Gregorian year that can be built from calendar fields.
const MAX_YEAR: i32 = 9999;

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if the date does not exist in the Gregorian calendar
    /// (e.g. February 30) or is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use abonilo::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2023, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        let date = Self::from_gregorian_lenient(year, month, day)?;
        (date.gregorian() == (year, month, day)).then_some(date)
    }

    /// Like [`Date::from_gregorian`], but a day past the end of the month
    /// rolls over into the following month(s): `(2023, 1, 32)` is February 1.
    /// `month` must be in `1..=12`.
    fn from_gregorian_lenient(year: i32, month: i32, day: i32) -> Option<Self> {
        if year > MAX_YEAR {
            return None;
        }
        let (y, m, d) = (year as i64, month as i64, day as i64);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }

    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use abonilo::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use abonilo::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        self.to_string()
    }

    /// Returns the date `months` Gregorian months later, keeping the day of
    /// month. A day that does not exist in the target month overflows into
    /// the next one, so January 31 plus one month is March 3 (or March 2 in a
    /// leap year).
    ///
    /// Returns `None` if the result is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use abonilo::Date;
    ///
    /// let date = Date::from_gregorian(2023, 1, 31).unwrap();
    /// assert_eq!("2023-03-03", date.add_months(1).unwrap().iso_gregorian());
    /// ```
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let (y, m, d) = self.gregorian();
        let total = (y as i64) * 12 + (m as i64 - 1) + months as i64;
        let year = i32::try_from(total.div_euclid(12)).ok()?;
        let month = total.rem_euclid(12) as i32 + 1;
        Self::from_gregorian_lenient(year, month, d)
    }

    /// Returns the same month and day `years` later, with the same overflow
    /// rule as [`Date::add_months`] (February 29 becomes March 1).
    pub fn add_years(&self, years: i32) -> Option<Self> {
        self.add_months(years.checked_mul(12)?)
    }

    /// Returns the date `days` days later (or earlier for a negative value).
    pub fn add_days(&self, days: i32) -> Option<Self> {
        let jdn = (self.jdn as i64).checked_add(days as i64)?;
        u32::try_from(jdn).ok().map(Self::from_jdn)
    }

    /// Advances the date by a [`Period`] in the Gregorian calendar.
    ///
    /// # Example
    ///
    /// ```
    /// use abonilo::{Date, Period, PeriodUnit};
    ///
    /// let date = Date::from_gregorian(2024, 2, 29).unwrap();
    /// let next = date.add_period(Period::new(1, PeriodUnit::Year)).unwrap();
    /// assert_eq!("2025-03-01", next.iso_gregorian());
    /// ```
    pub fn add_period(&self, period: Period) -> Option<Self> {
        match period.unit {
            PeriodUnit::Day => self.add_days(period.value),
            PeriodUnit::Month => self.add_months(period.value),
            PeriodUnit::Year => self.add_years(period.value),
        }
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

impl From<chrono::NaiveDate> for Date {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Date::from_jdn((date.num_days_from_ce() + CE_OFFSET) as u32)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.gregorian();
        write!(f, "{:04}-{:02}-{:02}", y, m, d)
    }
}

/// The text is not a valid `YYYY-MM-DD` Gregorian date.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("invalid date {0:?}, expected YYYY-MM-DD")]
pub struct ParseDateError(pub String);

impl FromStr for Date {
    type Err = ParseDateError;

    /// Parses an ISO 8601 calendar date. A trailing time part, as in
    /// `2023-01-22T00:00:00.000Z`, is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDateError(s.to_owned());
        let date_part = s.trim().split('T').next().unwrap_or_default();
        let mut it = date_part.splitn(3, '-');
        let mut field = || -> Result<i32, ParseDateError> {
            it.next().ok_or_else(err)?.parse().map_err(|_| err())
        };
        let (y, m, d) = (field()?, field()?, field()?);
        Date::from_gregorian(y, m, d).ok_or_else(err)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
        let date = Date::from_gregorian(1900, 1, 31).unwrap();
        assert_eq!(2415051, date.jdn());
    }

    #[test]
    fn rejects_nonexistent_days() {
        for (y, m, d) in [
            (2023, 2, 29),
            (2023, 2, 30),
            (1900, 2, 29),
            (2023, 4, 31),
            (2023, 13, 1),
            (2023, 0, 1),
            (2023, 1, 0),
        ] {
            assert_eq!(None, Date::from_gregorian(y, m, d), "{y:04}-{m:02}-{d:02}");
        }
        assert!(Date::from_gregorian(2000, 2, 29).is_some());
        assert!(Date::from_gregorian(2024, 2, 29).is_some());
    }

    #[test]
    fn far_future_years() {
        let last = Date::from_gregorian(9999, 12, 31).unwrap();
        assert_eq!((9999, 12, 31), last.gregorian());
        assert_eq!(None, Date::from_gregorian(10000, 1, 1));
        assert_eq!(None, Date::from_gregorian(i32::MAX, 12, 31));
        assert!("9999999-01-01".parse::<Date>().is_err());

        let date = Date::from_gregorian(2020, 1, 1).unwrap();
        assert_eq!(None, date.add_years(2_000_000));
        assert_eq!(None, date.add_months(i32::MAX));
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn month_arithmetic_overflows_like_host_dates() {
        let data = [
            ((2023, 1, 31), 1, "2023-03-03"),
            ((2024, 1, 31), 1, "2024-03-02"),
            ((2023, 3, 31), -1, "2023-03-03"),
            ((2023, 11, 15), 3, "2024-02-15"),
            ((2023, 5, 15), -17, "2021-12-15"),
        ];
        for ((y, m, d), months, std) in data {
            let date = Date::from_gregorian(y, m, d).unwrap();
            assert_eq!(std, date.add_months(months).unwrap().iso_gregorian());
        }
    }

    #[test]
    fn period_arithmetic() {
        let date = Date::from_gregorian(2023, 12, 25).unwrap();
        let data = [
            (Period::new(10, PeriodUnit::Day), "2024-01-04"),
            (Period::new(-25, PeriodUnit::Day), "2023-11-30"),
            (Period::new(2, PeriodUnit::Month), "2024-02-25"),
            (Period::new(3, PeriodUnit::Year), "2026-12-25"),
        ];
        for (period, std) in data {
            assert_eq!(std, date.add_period(period).unwrap().iso_gregorian());
        }
    }

    #[test]
    fn chrono_conversion() {
        let naive = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(2451545, Date::from(naive).jdn());
    }

    #[test]
    fn parse_iso() {
        assert_eq!(
            Ok(Date::from_gregorian(2021, 9, 8).unwrap()),
            "2021-09-08".parse()
        );
        assert_eq!(
            Ok(Date::from_gregorian(2023, 1, 22).unwrap()),
            "2023-01-22T00:00:00.000Z".parse()
        );
        for s in ["", "2021-09", "2021/09/08", "2021-02-30", "abc-01-01"] {
            assert_eq!(Err(ParseDateError(s.into())), s.parse::<Date>());
        }
    }

    #[test]
    fn serde_as_iso_string() {
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!("\"2021-09-08\"", json);
        assert_eq!(date, serde_json::from_str::<Date>(&json).unwrap());
        assert!(serde_json::from_str::<Date>("\"2021-13-01\"").is_err());
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
    }
}
