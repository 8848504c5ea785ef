//! Recurrence rule model.
//!
//! A [`RecurrenceRule`] describes how a base event repeats. Rules can only be
//! obtained through [`RecurrenceRuleBuilder::build`] or deserialisation, both
//! of which go through the same structural validation, so every rule held by
//! the rest of the workspace is well-formed.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tags::{MonthlyMode, MonthlyPosition, RecurrenceKind, Weekday};
use crate::{CadenceError, Result};

/// Validated recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecurrenceRule", into = "RawRecurrenceRule")]
pub struct RecurrenceRule {
    kind: RecurrenceKind,
    interval: u32,
    weekdays: Vec<Weekday>,
    monthly_mode: MonthlyMode,
    monthly_position: Option<MonthlyPosition>,
    monthly_weekday: Option<Weekday>,
    series_end: Option<NaiveDate>,
    series_count: Option<u32>,
}

impl RecurrenceRule {
    /// Start building a rule of the given kind.
    pub fn builder(kind: RecurrenceKind) -> RecurrenceRuleBuilder {
        RecurrenceRuleBuilder::new(kind)
    }

    /// The non-recurring rule: exactly one occurrence, the anchor.
    pub fn none() -> Self {
        Self {
            kind: RecurrenceKind::None,
            interval: 1,
            weekdays: Vec::new(),
            monthly_mode: MonthlyMode::ByDate,
            monthly_position: None,
            monthly_weekday: None,
            series_end: None,
            series_count: None,
        }
    }

    /// Recurrence frequency.
    pub fn kind(&self) -> RecurrenceKind {
        self.kind
    }

    /// Periods between repetitions, at least 1.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Selected weekdays, sorted Monday-first. Empty means "the anchor's own
    /// weekday".
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    /// How a monthly rule picks its day.
    pub fn monthly_mode(&self) -> MonthlyMode {
        self.monthly_mode
    }

    /// Ordinal of a monthly nth-weekday rule.
    pub fn monthly_position(&self) -> Option<MonthlyPosition> {
        self.monthly_position
    }

    /// Weekday of a monthly nth-weekday rule.
    pub fn monthly_weekday(&self) -> Option<Weekday> {
        self.monthly_weekday
    }

    /// Last calendar day on which an occurrence may start.
    pub fn series_end(&self) -> Option<NaiveDate> {
        self.series_end
    }

    /// Maximum number of generated dates, deleted instances included.
    pub fn series_count(&self) -> Option<u32> {
        self.series_count
    }

    /// False only for [`RecurrenceKind::None`].
    pub fn is_recurring(&self) -> bool {
        self.kind != RecurrenceKind::None
    }

    /// True iff an end date or an occurrence count limits the series.
    pub fn is_bounded(&self) -> bool {
        self.series_end.is_some() || self.series_count.is_some()
    }

    /// The `(position, weekday)` pair when this is a monthly nth-weekday rule.
    pub fn weekday_position(&self) -> Option<(MonthlyPosition, Weekday)> {
        if self.kind != RecurrenceKind::Monthly
            || self.monthly_mode != MonthlyMode::ByWeekdayPosition
        {
            return None;
        }
        self.monthly_position.zip(self.monthly_weekday)
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::none()
    }
}

/// Unvalidated, plain-data form of a rule.
///
/// This is the storage/wire shape; converting it into a [`RecurrenceRule`]
/// applies validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecurrenceRule {
    /// Recurrence frequency.
    pub kind: RecurrenceKind,
    /// Periods between repetitions.
    pub interval: u32,
    /// Weekly weekday selection.
    pub weekdays: Vec<Weekday>,
    /// Monthly day selection mode.
    pub monthly_mode: MonthlyMode,
    /// Ordinal for nth-weekday months.
    pub monthly_position: Option<MonthlyPosition>,
    /// Weekday for nth-weekday months.
    pub monthly_weekday: Option<Weekday>,
    /// Last day an occurrence may start on.
    pub series_end: Option<NaiveDate>,
    /// Maximum number of generated dates.
    pub series_count: Option<u32>,
}

impl Default for RawRecurrenceRule {
    fn default() -> Self {
        Self {
            kind: RecurrenceKind::None,
            interval: 1,
            weekdays: Vec::new(),
            monthly_mode: MonthlyMode::ByDate,
            monthly_position: None,
            monthly_weekday: None,
            series_end: None,
            series_count: None,
        }
    }
}

impl TryFrom<RawRecurrenceRule> for RecurrenceRule {
    type Error = CadenceError;

    fn try_from(raw: RawRecurrenceRule) -> Result<Self> {
        if raw.interval < 1 {
            return Err(CadenceError::InvalidRule("interval must be at least 1".to_string()));
        }

        let mut weekdays = raw.weekdays;
        if raw.kind == RecurrenceKind::Weekly {
            let mut seen = HashSet::with_capacity(weekdays.len());
            if let Some(dup) = weekdays.iter().find(|day| !seen.insert(**day)) {
                return Err(CadenceError::InvalidRule(format!(
                    "weekday '{dup}' is listed more than once"
                )));
            }
        }
        weekdays.sort_unstable();

        if raw.kind == RecurrenceKind::Monthly
            && raw.monthly_mode == MonthlyMode::ByWeekdayPosition
        {
            if raw.monthly_position.is_none() {
                return Err(CadenceError::InvalidRule(
                    "monthly weekday-position rule requires a position".to_string(),
                ));
            }
            if raw.monthly_weekday.is_none() {
                return Err(CadenceError::InvalidRule(
                    "monthly weekday-position rule requires a weekday".to_string(),
                ));
            }
        }

        if raw.series_count == Some(0) {
            return Err(CadenceError::InvalidRule("series count must be at least 1".to_string()));
        }

        Ok(Self {
            kind: raw.kind,
            interval: raw.interval,
            weekdays,
            monthly_mode: raw.monthly_mode,
            monthly_position: raw.monthly_position,
            monthly_weekday: raw.monthly_weekday,
            series_end: raw.series_end,
            series_count: raw.series_count,
        })
    }
}

impl From<RecurrenceRule> for RawRecurrenceRule {
    fn from(rule: RecurrenceRule) -> Self {
        Self {
            kind: rule.kind,
            interval: rule.interval,
            weekdays: rule.weekdays,
            monthly_mode: rule.monthly_mode,
            monthly_position: rule.monthly_position,
            monthly_weekday: rule.monthly_weekday,
            series_end: rule.series_end,
            series_count: rule.series_count,
        }
    }
}

/// Builder for [`RecurrenceRule`].
#[derive(Debug, Clone)]
pub struct RecurrenceRuleBuilder {
    raw: RawRecurrenceRule,
}

impl RecurrenceRuleBuilder {
    /// Start a rule of `kind` with interval 1 and no bounds.
    pub fn new(kind: RecurrenceKind) -> Self {
        Self { raw: RawRecurrenceRule { kind, ..RawRecurrenceRule::default() } }
    }

    /// Repeat every `interval` periods.
    pub fn interval(mut self, interval: u32) -> Self {
        self.raw.interval = interval;
        self
    }

    /// Weekdays a weekly rule fires on.
    pub fn weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.raw.weekdays = weekdays.into_iter().collect();
        self
    }

    /// Set the monthly mode directly.
    pub fn monthly_mode(mut self, mode: MonthlyMode) -> Self {
        self.raw.monthly_mode = mode;
        self
    }

    /// Set the nth-weekday ordinal.
    pub fn monthly_position(mut self, position: MonthlyPosition) -> Self {
        self.raw.monthly_position = Some(position);
        self
    }

    /// Set the nth-weekday weekday.
    pub fn monthly_weekday(mut self, weekday: Weekday) -> Self {
        self.raw.monthly_weekday = Some(weekday);
        self
    }

    /// Same day-of-month as the anchor.
    pub fn monthly_by_date(self) -> Self {
        self.monthly_mode(MonthlyMode::ByDate)
    }

    /// The `position`-th `weekday` of each month, e.g. "last Friday".
    pub fn monthly_by_position(self, position: MonthlyPosition, weekday: Weekday) -> Self {
        self.monthly_mode(MonthlyMode::ByWeekdayPosition)
            .monthly_position(position)
            .monthly_weekday(weekday)
    }

    /// Stop after `date`, inclusive.
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.raw.series_end = Some(date);
        self
    }

    /// Stop after `count` generated dates.
    pub fn count(mut self, count: u32) -> Self {
        self.raw.series_count = Some(count);
        self
    }

    /// Validate and produce the rule.
    ///
    /// # Errors
    /// Returns [`CadenceError::InvalidRule`] when the interval or count is
    /// zero, a weekly rule repeats a weekday, or a monthly weekday-position
    /// rule lacks its position or weekday.
    pub fn build(self) -> Result<RecurrenceRule> {
        RecurrenceRule::try_from(self.raw)
    }
}
