//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! workspace.

// Event validation limits
/// Maximum event title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;
/// Maximum event description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

// Upcoming-events query defaults
/// Default upcoming lookahead, in days.
pub const DEFAULT_UPCOMING_LOOKAHEAD_DAYS: u32 = 30;
/// Default cap on upcoming occurrences.
pub const DEFAULT_UPCOMING_LIMIT: usize = 10;

// Logging
/// Log filter used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Day key wire format (`YYYY-MM-DD`).
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
