//! Subscription renewal tracking with Chinese lunisolar calendar support.
//!
//! The core of this crate converts dates between the Gregorian calendar and
//! the Chinese lunisolar calendar for 1900 to 2100, using a precomputed table
//! of month lengths and leap months, and does date arithmetic in either
//! calendar. On top of it, [`renewal`] rolls subscriptions forward period by
//! period and decides which of them to remind about.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use abonilo::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(2451545, date.jdn());
//! assert_eq!("2000-01-01", date.iso_gregorian());
//! ```
//!
//! Chinese lunisolar calendar:
//!
//! ```
//! use abonilo::{Period, PeriodUnit};
//! use abonilo::chinese::{solar_to_lunar, Month::*};
//!
//! let lunar = solar_to_lunar(2023, 3, 22).unwrap();
//! assert_eq!((2023, Leap(2), 1), lunar.ymd());
//!
//! let next = lunar.add_period(Period::new(1, PeriodUnit::Year)).unwrap();
//! assert_eq!((2024, Common(2), 1), next.ymd());
//! assert_eq!("2024-03-10", next.to_date().unwrap().iso_gregorian());
//! ```

pub mod chinese;
pub mod clock;
pub mod config;
pub mod date;
pub mod error;
pub mod period;
pub mod renewal;

pub use config::Config;
pub use date::Date;
pub use error::{Error, Result};
pub use period::{Period, PeriodUnit};
pub use renewal::Subscription;
