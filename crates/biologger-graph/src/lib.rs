//! Biologger Graph - normalization and curve rendering for multi-variable
//! health trend graphs
//!
//! This crate provides:
//! - Variable definitions and an immutable variable library
//! - Per-variable domains and a shared normalized vertical axis
//! - Viewport filtering with day averaging
//! - Value and time axis ticks
//! - Monotone cubic curve paths (SVG `d` output)
//! - History statistics, week-over-week trends and weekly compaction
//!
//! # Example
//!
//! ```ignore
//! use biologger_graph::*;
//!
//! let library = VariableLibrary::default_library();
//! let history = entries_to_history(&log, &library, today, 365);
//!
//! let builder = chart::SeriesBuilder::new(GraphConfig::default());
//! let series = builder.build(
//!     library.graphable(),
//!     &history,
//!     "month",
//!     today,
//!     Some("sleep"),
//!     chart::Rect::from_size(800.0, 200.0),
//! )?;
//! ```

// Core primitives
mod curve;
mod marker;
mod monotone;
mod path;

// Data model
mod history;
mod stats;
mod variable;

mod config;
mod error;

// Chart pipeline
pub mod chart;

pub use config::*;
pub use curve::*;
pub use error::*;
pub use history::*;
pub use monotone::*;
pub use path::*;
pub use stats::*;
pub use variable::*;

pub use glam::DVec2;
