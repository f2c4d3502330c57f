//! Trend graph pipeline.
//!
//! Takes variables with unrelated units and ranges, and lays them out on one
//! shared vertical axis:
//!
//! - **Domains**: per-variable absolute ranges ([`graph_domain`])
//! - **Scale**: mapping into the shared [`NormalizedExtent`] and to pixels
//! - **Viewports**: named time windows with optional day averaging
//! - **Ticks**: value-axis and time-axis labels
//! - **Series**: the orchestrator producing renderable [`Series`]
//!
//! # Example
//!
//! ```ignore
//! use biologger_graph::chart::*;
//! use biologger_graph::{GraphConfig, VariableLibrary};
//!
//! let library = VariableLibrary::default_library();
//! let builder = SeriesBuilder::new(GraphConfig::default());
//!
//! let frame = builder.build_frame(
//!     library.graphable(),
//!     &history,
//!     "week",
//!     today,
//!     Some("bodyweight"),
//!     Rect::from_size(800.0, 200.0),
//! )?;
//!
//! for series in &frame.series {
//!     svg.path(series.path_data(), series.style.stroke_width, series.style.opacity);
//! }
//! ```

mod domain;
pub mod rect;
mod scale;
mod series;
mod ticks;
mod viewport;

pub use domain::*;
pub use rect::{Insets, Rect};
pub use scale::*;
pub use series::*;
pub use ticks::*;
pub use viewport::*;
