//! Small tag enums shared by the rule model and events.

use serde::{Deserialize, Serialize};

use crate::impl_domain_tag_conversions;

/// Day of the week, Monday-first.
///
/// Written as its two-letter code everywhere; the full English name is
/// accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "mo", alias = "monday")]
    Monday,
    #[serde(rename = "tu", alias = "tuesday")]
    Tuesday,
    #[serde(rename = "we", alias = "wednesday")]
    Wednesday,
    #[serde(rename = "th", alias = "thursday")]
    Thursday,
    #[serde(rename = "fr", alias = "friday")]
    Friday,
    #[serde(rename = "sa", alias = "saturday")]
    Saturday,
    #[serde(rename = "su", alias = "sunday")]
    Sunday,
}

impl_domain_tag_conversions!(Weekday {
    Monday => "mo" | "monday",
    Tuesday => "tu" | "tuesday",
    Wednesday => "we" | "wednesday",
    Thursday => "th" | "thursday",
    Friday => "fr" | "friday",
    Saturday => "sa" | "saturday",
    Sunday => "su" | "sunday",
});

impl Weekday {
    /// Every weekday, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Days since Monday (Monday = 0 … Sunday = 6).
    pub const fn days_from_monday(self) -> u32 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
            Weekday::Sunday => Self::Sun,
        }
    }
}

/// Ordinal of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthlyPosition {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl_domain_tag_conversions!(MonthlyPosition {
    First => "first",
    Second => "second",
    Third => "third",
    Fourth => "fourth",
    Last => "last",
});

impl MonthlyPosition {
    /// Zero-based match index for the forward-counting ordinals; `None` for
    /// [`MonthlyPosition::Last`].
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::First => Some(0),
            Self::Second => Some(1),
            Self::Third => Some(2),
            Self::Fourth => Some(3),
            Self::Last => None,
        }
    }
}

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Steps by `interval` days, like [`RecurrenceKind::Daily`].
    Custom,
}

impl_domain_tag_conversions!(RecurrenceKind {
    None => "none",
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
    Yearly => "yearly",
    Custom => "custom",
});

/// How a monthly rule picks its day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyMode {
    #[default]
    ByDate,
    ByWeekdayPosition,
}

impl_domain_tag_conversions!(MonthlyMode {
    ByDate => "by_date",
    ByWeekdayPosition => "by_weekday_position",
});

/// Display color of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Primary,
    Secondary,
    Accent,
}

impl_domain_tag_conversions!(EventColor {
    Primary => "primary",
    Secondary => "secondary",
    Accent => "accent",
});
