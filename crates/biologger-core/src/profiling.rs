//! Profiling utilities based on the `puffin` crate.
//!
//! Graph rebuilds are short synchronous passes. The graph crate only opens
//! scopes; the host owns the frame boundaries and calls [`finish_pass`] after
//! each rebuild. Hosts that want to inspect the data attach their own viewer
//! to [`puffin::GlobalProfiler`].

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

use crate::config::ProfilingMode;

/// Enable or disable scope recording.
pub fn init_profiling(mode: ProfilingMode) {
    let enabled = mode == ProfilingMode::On;
    puffin::set_scopes_on(enabled);
    if enabled {
        tracing::info!("Puffin scope recording enabled");
    }
}

/// Whether scopes are currently being recorded.
#[inline]
pub fn is_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Close the current profiling frame.
///
/// Called by the host once after each graph rebuild so scopes are grouped
/// per rebuild. Nothing in the graph pipeline calls it.
#[inline]
pub fn finish_pass() {
    puffin::GlobalProfiler::lock().new_frame();
}
