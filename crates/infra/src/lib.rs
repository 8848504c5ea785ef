//! # Cadence Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Configuration loading (environment, JSON and TOML files)
//! - The in-memory event repository
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `cadence-core`
//! - Depends on `cadence-domain` and `cadence-core`
//! - Contains all "impure" code (environment, filesystem, global subscriber)

pub mod config;
pub mod observability;
pub mod repository;

// Re-export commonly used items
pub use observability::init_tracing;
pub use repository::InMemoryEventRepository;
