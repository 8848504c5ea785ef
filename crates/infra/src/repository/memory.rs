//! In-process event store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cadence_core::EventRepository;
use cadence_domain::{CalendarEvent, Result};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

type EventMap = Arc<RwLock<HashMap<Uuid, CalendarEvent>>>;

/// `EventRepository` backed by a shared map.
///
/// Clones share the same map. Locks are never held across an await.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    events: EventMap,
}

impl InMemoryEventRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `events`, later duplicates replacing
    /// earlier ones.
    pub fn with_events(events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        let map = events.into_iter().map(|event| (event.id, event)).collect();
        Self { events: Arc::new(RwLock::new(map)) }
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True when no event is stored.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    /// Events ordered by anchor start, then id.
    async fn list(&self) -> Result<Vec<CalendarEvent>> {
        let mut events: Vec<CalendarEvent> = self.events.read().values().cloned().collect();
        events.sort_by(|a, b| a.anchor_start.cmp(&b.anchor_start).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CalendarEvent>> {
        Ok(self.events.read().get(&id).cloned())
    }

    async fn save(&self, event: CalendarEvent) -> Result<()> {
        let id = event.id;
        let replaced = self.events.write().insert(id, event).is_some();
        debug!(event_id = %id, replaced, "Stored event");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.events.write().remove(&id).is_some())
    }
}
