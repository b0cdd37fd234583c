//! Renewal cadence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit of a [`Period`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Day,
    #[default]
    Month,
    Year,
}

impl PeriodUnit {
    /// Plural English name, as used in reminder texts.
    pub fn plural(&self) -> &'static str {
        match self {
            PeriodUnit::Day => "days",
            PeriodUnit::Month => "months",
            PeriodUnit::Year => "years",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PeriodUnit::Day => "day",
            PeriodUnit::Month => "month",
            PeriodUnit::Year => "year",
        })
    }
}

/// The text is none of `day`, `month` or `year`.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown period unit {0:?}, expected day, month or year")]
pub struct ParseUnitError(pub String);

impl FromStr for PeriodUnit {
    type Err = ParseUnitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" | "d" => Ok(PeriodUnit::Day),
            "month" | "months" | "m" => Ok(PeriodUnit::Month),
            "year" | "years" | "y" => Ok(PeriodUnit::Year),
            _ => Err(ParseUnitError(s.to_owned())),
        }
    }
}

/// A renewal interval of `value` days, months or years.
///
/// Renewals use `value >= 1`; day periods may also be negative when used for
/// plain date arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Period {
    pub value: i32,
    pub unit: PeriodUnit,
}

impl Period {
    pub fn new(value: i32, unit: PeriodUnit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.plural())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_units() {
        for (s, std) in [
            ("day", PeriodUnit::Day),
            ("Months", PeriodUnit::Month),
            (" year ", PeriodUnit::Year),
        ] {
            assert_eq!(Ok(std), s.parse());
        }
        assert!("fortnight".parse::<PeriodUnit>().is_err());
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!("\"month\"", serde_json::to_string(&PeriodUnit::Month).unwrap());
        assert_eq!(
            PeriodUnit::Year,
            serde_json::from_str::<PeriodUnit>("\"year\"").unwrap()
        );
    }

    #[test]
    fn display() {
        assert_eq!("3 months", Period::new(3, PeriodUnit::Month).to_string());
    }
}
