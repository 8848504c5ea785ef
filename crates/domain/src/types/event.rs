//! Base calendar events and their per-day exceptions.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::day_key::DayKey;
use super::recurrence::RecurrenceRule;
use super::tags::EventColor;
use crate::constants::{MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
use crate::{CadenceError, Result};

/// Calendar an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRef {
    /// Calendar identifier used for filtering.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color, as stored by the client.
    pub color: String,
}

/// Fields a modified occurrence may override. `None` keeps the generated
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOverride {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement color.
    pub color: Option<EventColor>,
    /// Moved start; the end follows unless also given.
    pub start: Option<DateTime<Utc>>,
    /// Moved end.
    pub end: Option<DateTime<Utc>>,
}

impl FieldOverride {
    /// Override only the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }

    /// Override both ends of the occurrence.
    pub fn timing(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start: Some(start), end: Some(end), ..Self::default() }
    }

    /// True when no field is overridden.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    /// True when the start or the end is overridden.
    pub fn overrides_timing(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// State of a single day of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "fields", rename_all = "snake_case")]
pub enum InstanceException {
    /// The day produces no occurrence.
    Deleted,
    /// The day's occurrence takes these overrides.
    Modified(FieldOverride),
}

/// A base event: the anchor occurrence, its recurrence rule and exceptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Stable identifier.
    pub id: Uuid,
    /// Title shown on every occurrence.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Display color.
    #[serde(default)]
    pub color: Option<EventColor>,
    /// Calendar the event is filed under.
    #[serde(default)]
    pub calendar: Option<CalendarRef>,
    /// Rendered as an all-day event.
    #[serde(default)]
    pub is_all_day: bool,
    /// Start of the first occurrence; its time of day is reused by the series.
    pub anchor_start: DateTime<Utc>,
    /// End of the first occurrence.
    pub anchor_end: DateTime<Utc>,
    /// How the event repeats.
    #[serde(default)]
    pub recurrence: RecurrenceRule,
    /// Per-day deletions and edits, keyed by generated day.
    #[serde(default)]
    pub exceptions: BTreeMap<DayKey, InstanceException>,
}

impl CalendarEvent {
    /// Create a one-off event with a fresh id.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            color: None,
            calendar: None,
            is_all_day: false,
            anchor_start: start,
            anchor_end: end,
            recurrence: RecurrenceRule::none(),
            exceptions: BTreeMap::new(),
        }
    }

    /// Set the recurrence rule.
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = rule;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the display color.
    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = Some(color);
        self
    }

    /// File the event under `calendar`.
    pub fn with_calendar(mut self, calendar: CalendarRef) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Mark the event as all-day.
    pub fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }

    /// Length of every generated occurrence.
    pub fn duration(&self) -> Duration {
        self.anchor_end - self.anchor_start
    }

    /// Id of the event's calendar, if any.
    pub fn calendar_id(&self) -> Option<&str> {
        self.calendar.as_ref().map(|c| c.id.as_str())
    }

    /// Check the event-level invariants.
    ///
    /// # Errors
    /// Returns [`CadenceError::InvalidInput`] when the title is blank or too
    /// long, the description is too long, or the anchor ends before it
    /// starts.
    pub fn validate(&self) -> Result<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CadenceError::InvalidInput("Title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(CadenceError::InvalidInput(format!(
                "Title exceeds {MAX_TITLE_LENGTH} characters"
            )));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(CadenceError::InvalidInput(format!(
                "Description exceeds {MAX_DESCRIPTION_LENGTH} characters"
            )));
        }
        if self.anchor_end < self.anchor_start {
            return Err(CadenceError::InvalidInput(
                "End time must not be before start time".to_string(),
            ));
        }
        Ok(())
    }

    /// Exception recorded for `day`, if any.
    pub fn exception(&self, day: DayKey) -> Option<&InstanceException> {
        self.exceptions.get(&day)
    }

    /// Mark the occurrence generated on `day` as deleted, replacing any
    /// modification recorded for that day.
    pub fn delete_instance(&mut self, day: DayKey) {
        self.exceptions.insert(day, InstanceException::Deleted);
    }

    /// Record field overrides for the occurrence generated on `day`,
    /// replacing any earlier deletion or modification.
    ///
    /// # Errors
    /// Returns [`CadenceError::InvalidInput`] when the override is empty or
    /// its explicit end precedes its explicit start.
    pub fn modify_instance(&mut self, day: DayKey, fields: FieldOverride) -> Result<()> {
        if fields.is_empty() {
            return Err(CadenceError::InvalidInput(format!(
                "Modifications for {day} must override at least one field"
            )));
        }
        if let (Some(start), Some(end)) = (fields.start, fields.end) {
            if end < start {
                return Err(CadenceError::InvalidInput(format!(
                    "Modified end for {day} is before its start"
                )));
            }
        }
        self.exceptions.insert(day, InstanceException::Modified(fields));
        Ok(())
    }

    /// Drop any exception for `day`. Returns whether one existed.
    pub fn clear_instance(&mut self, day: DayKey) -> bool {
        self.exceptions.remove(&day).is_some()
    }
}
