//! Logging and tracing setup
//!
//! Installs a global `tracing` subscriber that formats events to stderr.
//! The filter comes from `RUST_LOG` when it is set and valid, otherwise from
//! [`LoggingConfig::level`]; an invalid configured level falls back to
//! `info`.

use cadence_domain::constants::DEFAULT_LOG_LEVEL;
use cadence_domain::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left untouched.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let installed = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %config.level, "Tracing initialised");
    }
    installed
}

/// Filter for `config`, preferring `RUST_LOG`.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(&config.level))
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
