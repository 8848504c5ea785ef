//! Port interfaces for event storage
//!
//! The engine never touches storage; these traits are what the calendar
//! service needs from whichever store infrastructure provides.

use async_trait::async_trait;
use cadence_domain::{CalendarEvent, Result};
use uuid::Uuid;

/// Trait for persisting base events
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All stored events
    async fn list(&self) -> Result<Vec<CalendarEvent>>;

    /// Event with the given id, if stored
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CalendarEvent>>;

    /// Insert or replace an event by id
    async fn save(&self, event: CalendarEvent) -> Result<()>;

    /// Remove an event. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
