//! Calendar service - event mutations and occurrence queries

use std::sync::Arc;

use cadence_domain::{
    CadenceError, CalendarConfig, CalendarEvent, CalendarView, DayKey, FieldOverride, Occurrence,
    Result, TimeWindow,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ports::EventRepository;
use crate::recurrence::expand_all;

/// Calendar service
///
/// Owns no state of its own: every call reads or writes through the
/// repository, and every query expands the stored events on demand.
pub struct CalendarService {
    repository: Arc<dyn EventRepository>,
    config: CalendarConfig,
}

impl CalendarService {
    /// Create a new calendar service
    pub fn new(repository: Arc<dyn EventRepository>, config: CalendarConfig) -> Self {
        Self { repository, config }
    }

    /// Calendar settings this service was built with.
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Validate and store an event, replacing any event with the same id
    pub async fn save_event(&self, event: CalendarEvent) -> Result<CalendarEvent> {
        event.validate()?;
        self.repository.save(event.clone()).await?;
        info!(event_id = %event.id, kind = %event.recurrence.kind(), "Saved event");
        Ok(event)
    }

    /// Remove an event and its whole series
    pub async fn delete_event(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            warn!(event_id = %id, "Delete requested for unknown event");
            return Err(not_found(id));
        }
        info!(event_id = %id, "Deleted event");
        Ok(())
    }

    /// Hide the occurrence generated on `day`
    pub async fn delete_instance(&self, id: Uuid, day: DayKey) -> Result<CalendarEvent> {
        let mut event = self.load(id).await?;
        event.delete_instance(day);
        self.repository.save(event.clone()).await?;
        info!(event_id = %id, %day, "Deleted instance");
        Ok(event)
    }

    /// Override fields of the occurrence generated on `day`
    pub async fn modify_instance(
        &self,
        id: Uuid,
        day: DayKey,
        fields: FieldOverride,
    ) -> Result<CalendarEvent> {
        let mut event = self.load(id).await?;
        event.modify_instance(day, fields)?;
        self.repository.save(event.clone()).await?;
        info!(event_id = %id, %day, "Modified instance");
        Ok(event)
    }

    /// Drop any deletion or modification recorded for `day`
    pub async fn restore_instance(&self, id: Uuid, day: DayKey) -> Result<CalendarEvent> {
        let mut event = self.load(id).await?;
        if event.clear_instance(day) {
            self.repository.save(event.clone()).await?;
            info!(event_id = %id, %day, "Restored instance");
        } else {
            debug!(event_id = %id, %day, "No exception to restore");
        }
        Ok(event)
    }

    /// Occurrences of all stored events in `window`, optionally limited to
    /// one calendar
    pub async fn occurrences_between(
        &self,
        window: &TimeWindow,
        calendar_id: Option<&str>,
    ) -> Result<Vec<Occurrence>> {
        let events = self.repository.list().await?;
        let selected = events
            .iter()
            .filter(|event| calendar_id.map_or(true, |id| event.calendar_id() == Some(id)));
        let occurrences = expand_all(selected, window);
        debug!(
            events = events.len(),
            occurrences = occurrences.len(),
            calendar_id = calendar_id.unwrap_or("*"),
            "Expanded window"
        );
        Ok(occurrences)
    }

    /// Occurrences shown by a day, week or month view around `date`
    pub async fn occurrences_for_view(
        &self,
        view: CalendarView,
        date: NaiveDate,
        calendar_id: Option<&str>,
    ) -> Result<Vec<Occurrence>> {
        let window = TimeWindow::for_view(view, date, self.config.week_starts_on);
        self.occurrences_between(&window, calendar_id).await
    }

    /// The next occurrences from `now` within the configured lookahead,
    /// capped at the configured limit
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Occurrence>> {
        let lookahead = Duration::days(i64::from(self.config.upcoming_lookahead_days));
        let end = now.checked_add_signed(lookahead).ok_or_else(|| {
            CadenceError::InvalidInput(format!("Lookahead from {now} is out of range"))
        })?;
        let mut occurrences = self.occurrences_between(&TimeWindow::new(now, end), None).await?;
        occurrences.truncate(self.config.upcoming_limit);
        Ok(occurrences)
    }

    async fn load(&self, id: Uuid) -> Result<CalendarEvent> {
        self.repository.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> CadenceError {
    CadenceError::NotFound(format!("Event {id} not found"))
}
