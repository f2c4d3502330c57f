/// Process-level configuration for biologger hosts.
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing` filter directives. `None` defers to `RUST_LOG`, then to
    /// [`crate::logging::DEFAULT_FILTER`].
    pub log_filter: Option<String>,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: None,
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    /// Set the log filter directives.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Set the profiling mode.
    pub fn with_profiling(mut self, mode: ProfilingMode) -> Self {
        self.profiling = mode;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling scopes are compiled in but not recorded
    #[default]
    Off,
    /// Scopes are recorded into the global puffin profiler, one frame per graph rebuild
    On,
}
