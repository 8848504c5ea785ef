//! # Cadence Domain
//!
//! Business domain types and models for Cadence.
//!
//! This crate contains:
//! - The recurrence rule model and its validation
//! - Calendar events, per-day exceptions and materialised occurrences
//! - Query windows for day/week/month views
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other Cadence crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
