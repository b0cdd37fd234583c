//! Subscription records and the expiry sweep.
//!
//! A record either renews in the Gregorian calendar or, with `useLunar`, on
//! the same lunar date every period. The sweep rolls overdue auto-renewing
//! records forward and collects the ones that should be reminded.

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::chinese::{LunarDate, PeriodError};
use crate::config::Config;
use crate::date::Date;
use crate::error::{Error, Result};
use crate::period::{Period, PeriodUnit};

/// A stored subscription, in the camelCase JSON layout of the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<Date>,
    pub expiry_date: Date,
    #[serde(default = "default_period_value")]
    pub period_value: i32,
    #[serde(default)]
    pub period_unit: PeriodUnit,
    /// Days before expiry to start reminding; `None` uses
    /// [`Config::default_reminder_days`].
    #[serde(default)]
    pub reminder_days: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub auto_renew: bool,
    #[serde(default)]
    pub use_lunar: bool,
}

fn default_period_value() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

impl Subscription {
    /// A new active, auto-renewing record with a one-month period.
    pub fn new(id: impl Into<String>, name: impl Into<String>, expiry_date: Date) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            custom_type: None,
            start_date: None,
            expiry_date,
            period_value: default_period_value(),
            period_unit: PeriodUnit::default(),
            reminder_days: None,
            notes: None,
            is_active: true,
            auto_renew: true,
            use_lunar: false,
        }
    }

    pub fn period(&self) -> Period {
        Period::new(self.period_value, self.period_unit)
    }

    pub fn reminder_days(&self, config: &Config) -> i32 {
        self.reminder_days.unwrap_or(config.default_reminder_days)
    }

    /// The lunar date of the expiry, if it is inside the supported range.
    pub fn lunar_expiry(&self) -> Option<LunarDate> {
        LunarDate::from_date(self.expiry_date)
    }

    /// Days from `today` until expiry, negative once expired.
    ///
    /// Lunar records count to the solar counterpart of their lunar expiry and
    /// fall back to the plain difference when that is unavailable.
    pub fn days_remaining(&self, today: Date) -> i32 {
        if self.use_lunar {
            if let Some(days) = self.lunar_expiry().and_then(|l| l.days_until(today)) {
                return days;
            }
        }
        self.expiry_date - today
    }

    /// Returns the first expiry on or after `not_before`, adding whole periods
    /// to the current expiry, at most `limit` of them.
    ///
    /// Lunar records advance in the lunar calendar; if the expiry has no lunar
    /// date they advance in the solar calendar instead.
    ///
    /// # Example
    ///
    /// ```
    /// use abonilo::{Date, PeriodUnit, Subscription};
    ///
    /// let mut sub = Subscription::new("1", "Lantern lease", "2023-02-05".parse().unwrap());
    /// sub.use_lunar = true;
    /// sub.period_unit = PeriodUnit::Year;
    ///
    /// let today = Date::from_gregorian(2024, 1, 1).unwrap();
    /// // 正月十五 of the next lunar year
    /// assert_eq!("2024-02-24", sub.roll_forward(today, 10_000).unwrap().iso_gregorian());
    /// ```
    pub fn roll_forward(&self, not_before: Date, limit: u32) -> Result<Date> {
        if self.use_lunar {
            match self.lunar_expiry() {
                Some(lunar) => return self.roll_lunar(lunar, not_before, limit),
                None => warn!(
                    "subscription {:?}: expiry {} has no lunar date, renewing in the solar calendar",
                    self.id, self.expiry_date
                ),
            }
        }
        self.roll_solar(not_before, limit)
    }

    fn roll_solar(&self, not_before: Date, limit: u32) -> Result<Date> {
        let period = self.period();
        let mut expiry = self.expiry_date;
        let mut steps = 0;
        while expiry < not_before {
            if steps == limit {
                return Err(self.limit_exceeded(not_before, limit));
            }
            expiry = expiry
                .add_period(period)
                .ok_or_else(|| Error::DateOutOfRange {
                    id: self.id.clone(),
                    expiry,
                })?;
            steps += 1;
        }
        Ok(expiry)
    }

    fn roll_lunar(&self, mut lunar: LunarDate, not_before: Date, limit: u32) -> Result<Date> {
        let period = self.period();
        let mut expiry = self.expiry_date;
        let mut steps = 0;
        while expiry < not_before {
            if steps == limit {
                return Err(self.limit_exceeded(not_before, limit));
            }
            lunar = match lunar.add_period(period) {
                Ok(next) => next,
                Err(PeriodError::Unrepresentable(next)) => {
                    warn!(
                        "subscription {:?}: {} + {} is not a valid lunar date",
                        self.id, lunar, period
                    );
                    next
                }
                Err(PeriodError::OutOfRange(_)) => {
                    return Err(Error::DateOutOfRange {
                        id: self.id.clone(),
                        expiry,
                    });
                }
            };
            expiry = lunar.to_date().ok_or_else(|| Error::NoSolarCounterpart {
                id: self.id.clone(),
                lunar,
            })?;
            steps += 1;
        }
        Ok(expiry)
    }

    fn limit_exceeded(&self, not_before: Date, limit: u32) -> Error {
        Error::RenewalLimitExceeded {
            id: self.id.clone(),
            not_before,
            limit,
        }
    }

    /// Moves an expiry that is today or earlier to the first period boundary
    /// after today, as done when a record is created or edited. Records with
    /// a future expiry are left alone.
    ///
    /// Returns whether the expiry changed.
    pub fn normalize_expiry(&mut self, today: Date, config: &Config) -> Result<bool> {
        if self.expiry_date > today {
            return Ok(false);
        }
        let next = self.roll_forward(today + 1, config.max_renewal_iterations)?;
        let changed = next != self.expiry_date;
        self.expiry_date = next;
        Ok(changed)
    }
}

/// An expiry moved forward by the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renewal {
    pub id: String,
    pub from: Date,
    pub to: Date,
}

/// A record that should be reminded about, as it stands after the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub subscription: Subscription,
    /// Negative for an expired record that does not auto-renew.
    pub days_remaining: i32,
}

/// A record the sweep could not process.
#[derive(Debug)]
pub struct Failure {
    pub id: String,
    pub error: Error,
}

/// Outcome of [`sweep`].
#[derive(Debug, Default)]
pub struct SweepReport {
    pub renewed: Vec<Renewal>,
    /// Sorted by days remaining, most urgent first.
    pub reminders: Vec<Reminder>,
    pub failures: Vec<Failure>,
}

/// Checks every active record against `today`.
///
/// - Overdue records with auto-renew get their expiry rolled forward (the
///   record is updated in place) and are reminded if the new expiry falls
///   inside their reminder window. Solar records end up after today, lunar
///   records on today or later.
/// - Overdue records without auto-renew are reminded as expired.
/// - Other records are reminded when `0 <= days remaining <= reminder days`.
///
/// A record whose renewal fails is reported in [`SweepReport::failures`] and
/// left unchanged; the sweep carries on with the rest.
pub fn sweep(subscriptions: &mut [Subscription], today: Date, config: &Config) -> SweepReport {
    let mut report = SweepReport::default();
    info!("checking {} subscriptions for {}", subscriptions.len(), today);

    for sub in subscriptions.iter_mut() {
        if !sub.is_active {
            debug!("subscription {:?} is disabled, skipping", sub.name);
            continue;
        }
        let reminder_days = sub.reminder_days(config);
        let days = sub.days_remaining(today);
        debug!("subscription {:?} expires {}, {} days left", sub.name, sub.expiry_date, days);

        if days < 0 && sub.auto_renew {
            // Lunar records may land on today; solar ones move strictly past it.
            let not_before = if sub.use_lunar { today } else { today + 1 };
            let next = match sub.roll_forward(not_before, config.max_renewal_iterations) {
                Ok(next) => next,
                Err(error) => {
                    error!("subscription {:?}: renewal failed: {}", sub.name, error);
                    report.failures.push(Failure {
                        id: sub.id.clone(),
                        error,
                    });
                    continue;
                }
            };
            report.renewed.push(Renewal {
                id: sub.id.clone(),
                from: sub.expiry_date,
                to: next,
            });
            sub.expiry_date = next;
            let days = sub.days_remaining(today);
            info!(
                "subscription {:?} renewed to {}, {} days left",
                sub.name, next, days
            );
            if days <= reminder_days {
                report.reminders.push(Reminder {
                    subscription: sub.clone(),
                    days_remaining: days,
                });
            }
            continue;
        }

        let within_window = (0..=reminder_days).contains(&days);
        if days < 0 || within_window {
            debug!("subscription {:?} will be reminded", sub.name);
            report.reminders.push(Reminder {
                subscription: sub.clone(),
                days_remaining: days,
            });
        }
    }

    report.reminders.sort_by_key(|r| r.days_remaining);
    report
}

impl Reminder {
    /// One line of the reminder digest, with an optional notes line.
    pub fn status_line(&self, show_lunar: bool) -> String {
        let sub = &self.subscription;
        let kind = sub
            .custom_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Other");
        let lunar = match show_lunar.then(|| sub.lunar_expiry()).flatten() {
            Some(lunar) => format!(" (Lunar: {})", lunar),
            None => String::new(),
        };
        let head = format!("**{}** ({}) (Period: {})", sub.name, kind, sub.period());
        let mut line = match self.days_remaining {
            0 => format!("⚠️ {} is due today!{}", head, lunar),
            d if d < 0 => format!("🚨 {} expired {} days ago{}", head, -d, lunar),
            d => format!("📅 {} will expire in {} days{}", head, d, lunar),
        };
        if let Some(notes) = sub.notes.as_deref().filter(|s| !s.is_empty()) {
            line += "\n   Notes: ";
            line += notes;
        }
        line
    }
}

/// Title and body of the digest sent to notification channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

/// Builds the digest for a list of reminders, `None` when there is nothing
/// to send.
pub fn digest(reminders: &[Reminder], show_lunar: bool) -> Option<Notice> {
    if reminders.is_empty() {
        return None;
    }
    let body = reminders
        .iter()
        .map(|r| r.status_line(show_lunar))
        .collect::<Vec<_>>()
        .join("\n\n");
    Some(Notice {
        title: "Subscription Expiry Reminder".to_owned(),
        body,
    })
}
