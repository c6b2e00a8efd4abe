//! Runtime settings read from the environment
//!
//! Recognised variables:
//!   PORTFOLIO_PATH_COUNT, PORTFOLIO_GOAL_PATH_COUNT, PORTFOLIO_SEED,
//!   PORTFOLIO_DAY_COUNT (365 | 365.25)

use crate::error::{AnalyticsError, Result};
use crate::returns::DayCount;
use crate::simulation::DEFAULT_GOAL_PATH_COUNT;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const PATH_COUNT_VAR: &str = "PORTFOLIO_PATH_COUNT";
pub const GOAL_PATH_COUNT_VAR: &str = "PORTFOLIO_GOAL_PATH_COUNT";
pub const SEED_VAR: &str = "PORTFOLIO_SEED";
pub const DAY_COUNT_VAR: &str = "PORTFOLIO_DAY_COUNT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Paths for projection runs
    pub path_count: usize,

    /// Paths for the separate goal-success batch
    pub goal_path_count: usize,

    /// Fixed seed for reproducible runs; None draws from OS entropy
    pub seed: Option<u64>,

    /// Day count used for XIRR
    pub day_count: DayCount,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path_count: 1_000,
            goal_path_count: DEFAULT_GOAL_PATH_COUNT,
            seed: None,
            day_count: DayCount::Actual365Fixed,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            path_count: parse_var(&lookup, PATH_COUNT_VAR)?.unwrap_or(defaults.path_count),
            goal_path_count: parse_var(&lookup, GOAL_PATH_COUNT_VAR)?.unwrap_or(defaults.goal_path_count),
            seed: parse_var(&lookup, SEED_VAR)?,
            day_count: match lookup(DAY_COUNT_VAR) {
                Some(value) => parse_day_count(&value)?,
                None => defaults.day_count,
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AnalyticsError::InvalidSetting {
                key: key.to_string(),
                value,
            }),
        None => Ok(None),
    }
}

fn parse_day_count(value: &str) -> Result<DayCount> {
    match value.trim() {
        "365" => Ok(DayCount::Actual365Fixed),
        "365.25" => Ok(DayCount::Actual36525),
        other => Err(AnalyticsError::InvalidSetting {
            key: DAY_COUNT_VAR.to_string(),
            value: other.to_string(),
        }),
    }
}
