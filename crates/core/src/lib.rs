//! # Cadence Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The recurrence expansion engine (candidate walk, nth-weekday resolution)
//! - Port/adapter interfaces (traits)
//! - The calendar service built on top of them
//!
//! ## Architecture Principles
//! - Only depends on `cadence-domain`
//! - No storage, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod calendar;
pub mod recurrence;

pub use calendar::ports::EventRepository;
pub use calendar::CalendarService;
pub use recurrence::{expand, expand_all, expand_window, nth_weekday_of_month, CandidateDates};
