use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cadence_core::EventRepository;
use cadence_domain::{
    CadenceError, CalendarEvent, CalendarRef, RecurrenceKind, RecurrenceRule,
    Result as DomainResult,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

/// In-memory mock for `EventRepository`.
///
/// Keeps events in insertion order and records every saved id so tests can
/// assert on write traffic.
#[derive(Default, Clone)]
pub struct MockEventRepository {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
    saves: Arc<Mutex<Vec<Uuid>>>,
    fail: bool,
}

impl MockEventRepository {
    /// Create a new mock seeded with the provided events.
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events: Arc::new(Mutex::new(events)), ..Self::default() }
    }

    /// A mock whose every call fails with a storage error.
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    /// Ids passed to `save`, in call order.
    pub fn saved_ids(&self) -> Vec<Uuid> {
        self.saves.lock().unwrap().clone()
    }

    pub fn stored(&self, id: Uuid) -> Option<CalendarEvent> {
        self.events.lock().unwrap().iter().find(|event| event.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn check(&self) -> DomainResult<()> {
        if self.fail {
            return Err(CadenceError::Storage("mock store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MockEventRepository {
    async fn list(&self) -> DomainResult<Vec<CalendarEvent>> {
        self.check()?;
        Ok(self.events.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CalendarEvent>> {
        self.check()?;
        Ok(self.stored(id))
    }

    async fn save(&self, event: CalendarEvent) -> DomainResult<()> {
        self.check()?;
        self.saves.lock().unwrap().push(event.id);
        let mut events = self.events.lock().unwrap();
        match events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        self.check()?;
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|event| event.id != id);
        Ok(events.len() != before)
    }
}

/// UTC timestamp helper.
pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// An hour-long event starting at `start`.
pub fn hour_event(title: &str, start: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent::new(title, start, start + Duration::hours(1))
}

/// An hour-long daily series starting at `start`.
pub fn daily_event(title: &str, start: DateTime<Utc>) -> CalendarEvent {
    hour_event(title, start)
        .with_recurrence(RecurrenceRule::builder(RecurrenceKind::Daily).build().unwrap())
}

pub fn calendar(id: &str) -> CalendarRef {
    CalendarRef { id: id.to_string(), name: format!("{id} calendar"), color: "#3b82f6".to_string() }
}
