//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_UPCOMING_LIMIT, DEFAULT_UPCOMING_LOOKAHEAD_DAYS};
use crate::{CadenceError, Result, Weekday};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Calendar view and query settings.
    pub calendar: CalendarConfig,
    /// Log filter settings; defaults when absent.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Calendar query configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// First day of week and month views.
    pub week_starts_on: Weekday,
    /// How far ahead the upcoming query scans, in days.
    pub upcoming_lookahead_days: u32,
    /// Maximum number of upcoming occurrences returned.
    pub upcoming_limit: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `cadence_core=debug`.
    pub level: String,
}

impl Config {
    /// Reject values no query could work with.
    ///
    /// # Errors
    /// Returns [`CadenceError::Config`] for a zero lookahead or limit.
    pub fn validate(&self) -> Result<()> {
        if self.calendar.upcoming_lookahead_days == 0 {
            return Err(CadenceError::Config(
                "upcoming_lookahead_days must be at least 1".to_string(),
            ));
        }
        if self.calendar.upcoming_limit == 0 {
            return Err(CadenceError::Config("upcoming_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { calendar: CalendarConfig::default(), logging: LoggingConfig::default() }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_starts_on: Weekday::Sunday,
            upcoming_lookahead_days: DEFAULT_UPCOMING_LOOKAHEAD_DAYS,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string() }
    }
}
