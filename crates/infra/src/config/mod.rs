//! Configuration loading and management
//!
//! Reads [`cadence_domain::Config`] from environment variables or a config
//! file and validates it.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
