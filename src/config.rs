//! Sweep configuration.
//!
//! Loaded from a JSON file whose fields all have defaults, then overridden
//! from `ABONILO_*` environment variables.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings shared by the renewal sweep and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Minutes the owner's timezone is ahead of UTC; decides where "today"
    /// begins. UTC by default, `480` for Beijing time.
    #[serde(default = "default_tz_offset")]
    pub timezone_offset_minutes: i32,
    /// Reminder window for records that do not set their own.
    #[serde(default = "default_reminder_days")]
    pub default_reminder_days: i32,
    /// Upper bound on periods added while rolling one overdue record forward.
    #[serde(default = "default_max_renewals")]
    pub max_renewal_iterations: u32,
    /// Append the lunar expiry date to reminder lines.
    #[serde(default)]
    pub show_lunar: bool,
}

fn default_tz_offset() -> i32 {
    0
}

fn default_reminder_days() -> i32 {
    7
}

fn default_max_renewals() -> u32 {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone_offset_minutes: default_tz_offset(),
            default_reminder_days: default_reminder_days(),
            max_renewal_iterations: default_max_renewals(),
            show_lunar: false,
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Applies `ABONILO_TZ_OFFSET_MINUTES`, `ABONILO_REMINDER_DAYS`,
    /// `ABONILO_MAX_RENEWALS` and `ABONILO_SHOW_LUNAR` from the process
    /// environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&'static str) -> Option<String>) -> Result<()> {
        if let Some(v) = parse_var(&var, "ABONILO_TZ_OFFSET_MINUTES")? {
            self.timezone_offset_minutes = v;
        }
        if let Some(v) = parse_var(&var, "ABONILO_REMINDER_DAYS")? {
            self.default_reminder_days = v;
        }
        if let Some(v) = parse_var(&var, "ABONILO_MAX_RENEWALS")? {
            self.max_renewal_iterations = v;
        }
        if let Some(v) = var("ABONILO_SHOW_LUNAR") {
            self.show_lunar = parse_bool(&v).ok_or(Error::InvalidEnv {
                name: "ABONILO_SHOW_LUNAR",
                value: v,
            })?;
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(
    var: &impl Fn(&'static str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>> {
    let Some(value) = var(name) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(Error::InvalidEnv { name, value }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
