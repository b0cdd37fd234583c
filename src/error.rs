//! Errors returned by the renewal layer and configuration loading.

use std::path::PathBuf;

use crate::chinese::LunarDate;
use crate::date::Date;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("subscription {id:?} still expires before {not_before} after {limit} renewal periods")]
    RenewalLimitExceeded {
        id: String,
        not_before: Date,
        limit: u32,
    },
    #[error("subscription {id:?}: lunar date {lunar} has no solar counterpart")]
    NoSolarCounterpart { id: String, lunar: LunarDate },
    #[error("subscription {id:?}: expiry date {expiry} cannot be advanced further")]
    DateOutOfRange { id: String, expiry: Date },
    #[error("reading config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    ConfigJson(#[from] serde_json::Error),
    #[error("environment variable {name}={value:?} is not valid")]
    InvalidEnv { name: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
