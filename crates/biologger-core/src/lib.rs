//! Biologger Core
//!
//! Ambient services shared by the biologger crates: logging setup,
//! profiling scopes and the process-level [`Config`].

pub mod config;
pub mod logging;
pub mod profiling;

pub use config::{Config, ProfilingMode};

/// Apply a [`Config`]: install the log subscriber and switch profiling on or off.
pub fn init(config: &Config) {
    match config.log_filter.as_deref() {
        Some(filter) => logging::init_with_filter(filter),
        None => logging::init(),
    }
    profiling::init_profiling(config.profiling);
}
