//! Materialised occurrences of an event.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::day_key::DayKey;
use super::event::{CalendarEvent, FieldOverride};
use super::tags::EventColor;
use super::window::overlaps;

/// One concrete instance of an event on the calendar.
///
/// Occurrences are computed on demand and carry no identity beyond
/// `(source_event_id, effective_start)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Id of the base event.
    pub source_event_id: Uuid,
    /// Day the rule generated this occurrence on, before any override.
    pub instance_day: DayKey,
    /// Start after overrides.
    pub effective_start: DateTime<Utc>,
    /// End after overrides.
    pub effective_end: DateTime<Utc>,
    /// Title after overrides.
    pub title: String,
    /// Description after overrides.
    pub description: String,
    /// Color after overrides.
    pub color: Option<EventColor>,
    /// Id of the base event's calendar.
    pub calendar_id: Option<String>,
    /// Copied from the base event.
    pub is_all_day: bool,
    /// True when a modified exception was applied.
    pub is_modified: bool,
}

impl Occurrence {
    /// Occurrence of `event` at `start`, with the event's own duration and
    /// display fields.
    ///
    /// `None` when the end would fall past the last representable instant.
    pub fn from_event(event: &CalendarEvent, start: DateTime<Utc>) -> Option<Self> {
        let effective_end = start.checked_add_signed(event.duration())?;
        Some(Self {
            source_event_id: event.id,
            instance_day: DayKey::of(start),
            effective_start: start,
            effective_end,
            title: event.title.clone(),
            description: event.description.clone(),
            color: event.color,
            calendar_id: event.calendar_id().map(str::to_owned),
            is_all_day: event.is_all_day,
            is_modified: false,
        })
    }

    /// Overlay `fields` on top of the generated values.
    ///
    /// Timing is kept unless the override supplies it. A new start without a
    /// new end keeps the duration, saturating at the last representable
    /// instant; an end earlier than the start collapses to the start.
    pub fn apply_override(mut self, fields: &FieldOverride) -> Self {
        if let Some(title) = &fields.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &fields.description {
            self.description.clone_from(description);
        }
        if fields.color.is_some() {
            self.color = fields.color;
        }
        if fields.overrides_timing() {
            let duration = self.duration();
            let start = fields.start.unwrap_or(self.effective_start);
            let end = fields
                .end
                .or_else(|| start.checked_add_signed(duration))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.effective_start = start;
            self.effective_end = end.max(start);
        }
        self.is_modified = true;
        self
    }

    /// Length of this occurrence after overrides.
    pub fn duration(&self) -> Duration {
        self.effective_end - self.effective_start
    }

    /// Whether this occurrence overlaps `[window_start, window_end)`.
    pub fn overlaps(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        overlaps(self.effective_start, self.effective_end, window_start, window_end)
    }
}
