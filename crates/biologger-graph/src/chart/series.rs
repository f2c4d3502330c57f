//! Series building: the pipeline that turns raw history into drawable series.
//!
//! For one render pass the [`SeriesBuilder`]:
//!
//! 1. filters the history to the viewport window (aggregating if the viewport asks for it),
//! 2. derives each variable's [`Domain`] from its filtered values,
//! 3. maps every logged value through the normalized extent to pixel space,
//! 4. runs the points through the monotone curve generator.
//!
//! Nothing here fails on data. Missing values are skipped, empty windows give
//! empty series and unknown variable ids in the history are ignored.

use super::domain::{Domain, graph_domain};
use super::rect::Rect;
use super::ticks::{TimeRange, TimeTick, ValueTick, time_ticks, variable_ticks};
use super::viewport::{ViewportSpec, ViewportTable, filter_history};
use crate::config::{EmphasisStyle, GraphConfig};
use crate::error::GraphResult;
use crate::history::HistoryEntry;
use crate::monotone::monotone_path;
use crate::variable::{MarkerShape, Variable};
use crate::Path;
use ahash::AHashSet;
use biologger_core::profiling::{profile_function, profile_scope};
use chrono::NaiveDate;
use glam::DVec2;

/// One plotted observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesPoint {
    /// Position in drawing space (y grows downward).
    pub position: DVec2,
    pub date: NaiveDate,
    /// Absolute value.
    pub value: f64,
    /// Value as logged, relative to the baseline.
    pub relative: f64,
}

/// Presentation emphasis of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesStyle {
    pub stroke_width: f64,
    pub opacity: f64,
    pub active: bool,
}

impl SeriesStyle {
    /// Emphasis for `variable_id` given the currently active variable.
    ///
    /// With no active variable every series is fully opaque at the inactive
    /// stroke width.
    pub fn for_variable(variable_id: &str, active: Option<&str>, emphasis: &EmphasisStyle) -> Self {
        match active {
            Some(id) if id == variable_id => Self {
                stroke_width: emphasis.active_stroke_width,
                opacity: emphasis.active_opacity,
                active: true,
            },
            Some(_) => Self {
                stroke_width: emphasis.inactive_stroke_width,
                opacity: emphasis.inactive_opacity,
                active: false,
            },
            None => Self {
                stroke_width: emphasis.inactive_stroke_width,
                opacity: emphasis.active_opacity,
                active: false,
            },
        }
    }
}

/// One variable's renderable representation for the current viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub variable_id: String,
    pub label: String,
    pub color: Option<String>,
    pub marker: MarkerShape,
    pub domain: Domain,
    /// Points ordered by increasing x.
    pub points: Vec<SeriesPoint>,
    pub path: Path,
    pub style: SeriesStyle,
}

impl Series {
    /// The SVG `d` attribute for the curve.
    pub fn path_data(&self) -> String {
        self.path.to_svg()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Marker outlines at every point.
    pub fn markers(&self, size: f64) -> Vec<Path> {
        self.points
            .iter()
            .map(|point| self.marker.to_path(point.position, size))
            .collect()
    }
}

/// Everything one render pass consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrame {
    /// Plot area inside the graph bounds.
    pub plot: Rect,
    /// Time span of the filtered history, `None` when it is empty.
    pub time_range: Option<TimeRange>,
    pub series: Vec<Series>,
    /// Value axis of the active variable; empty without one.
    pub value_ticks: Vec<ValueTick>,
    pub time_ticks: Vec<TimeTick>,
}

/// Builds [`Series`] from variables and history.
///
/// Holds only immutable configuration, so one builder can be shared freely
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    config: GraphConfig,
    viewports: ViewportTable,
}

impl SeriesBuilder {
    /// Create a builder with the default viewport table.
    ///
    /// Invalid config fields fall back to their defaults with a warning.
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config: config.validated(),
            viewports: ViewportTable::default(),
        }
    }

    /// Replace the viewport table.
    pub fn with_viewports(mut self, viewports: ViewportTable) -> Self {
        self.viewports = viewports;
        self
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn viewports(&self) -> &ViewportTable {
        &self.viewports
    }

    /// Build one series per variable, in the order given.
    ///
    /// `bounds` is the whole graph area; series are laid out in its inset plot
    /// area. Fails only for an unknown viewport name.
    pub fn build<'a>(
        &self,
        variables: impl IntoIterator<Item = &'a Variable>,
        history: &[HistoryEntry],
        viewport: &str,
        reference_date: NaiveDate,
        active: Option<&str>,
        bounds: Rect,
    ) -> GraphResult<Vec<Series>> {
        profile_function!();
        let viewport = self.viewports.get(viewport)?;
        let variables: Vec<&Variable> = variables.into_iter().collect();
        let filtered = filter_history(history, viewport, reference_date);
        let plot = bounds.inset(&self.config.insets);
        Ok(self.build_filtered(&variables, &filtered, active, plot))
    }

    /// Build the series plus both axes.
    pub fn build_frame<'a>(
        &self,
        variables: impl IntoIterator<Item = &'a Variable>,
        history: &[HistoryEntry],
        viewport: &str,
        reference_date: NaiveDate,
        active: Option<&str>,
        bounds: Rect,
    ) -> GraphResult<GraphFrame> {
        profile_function!();
        let viewport = self.viewports.get(viewport)?;
        let variables: Vec<&Variable> = variables.into_iter().collect();
        let filtered = filter_history(history, viewport, reference_date);
        let plot = bounds.inset(&self.config.insets);
        let series = self.build_filtered(&variables, &filtered, active, plot);

        let value_ticks = active
            .and_then(|id| {
                let variable = variables.iter().find(|v| v.id == id)?;
                let domain = series.iter().find(|s| s.variable_id == id)?.domain;
                Some(variable_ticks(
                    variable,
                    &domain,
                    self.config.value_tick_target,
                    &self.config.extent,
                ))
            })
            .unwrap_or_default();

        let time_range = history_time_range(&filtered);
        let time_ticks = self.time_axis(time_range, viewport, reference_date, &plot);

        Ok(GraphFrame {
            plot,
            time_range,
            series,
            value_ticks,
            time_ticks,
        })
    }

    fn time_axis(
        &self,
        range: Option<TimeRange>,
        viewport: &ViewportSpec,
        reference_date: NaiveDate,
        plot: &Rect,
    ) -> Vec<TimeTick> {
        // With no data, label the window that would have been shown.
        let range = range.unwrap_or_else(|| {
            TimeRange::from_dates(viewport.window_start(reference_date), reference_date)
        });
        time_ticks(&range, viewport, plot, self.config.min_time_tick_spacing)
    }

    fn build_filtered(
        &self,
        variables: &[&Variable],
        filtered: &[HistoryEntry],
        active: Option<&str>,
        plot: Rect,
    ) -> Vec<Series> {
        log_unknown_ids(variables, filtered, active);

        let Some(time_range) = history_time_range(filtered) else {
            tracing::trace!("empty viewport, building empty series");
            return variables
                .iter()
                .map(|variable| self.empty_series(variable, active))
                .collect();
        };

        variables
            .iter()
            .map(|variable| self.build_series(variable, filtered, &time_range, active, plot))
            .collect()
    }

    fn build_series(
        &self,
        variable: &Variable,
        filtered: &[HistoryEntry],
        time_range: &TimeRange,
        active: Option<&str>,
        plot: Rect,
    ) -> Series {
        profile_scope!("build_series", variable.id.as_str());
        let logged: Vec<(NaiveDate, f64)> = filtered
            .iter()
            .filter_map(|entry| entry.value(&variable.id).map(|v| (entry.date, v)))
            .collect();
        let relative: Vec<f64> = logged.iter().map(|&(_, v)| v).collect();
        let domain = graph_domain(variable, &relative, self.config.domain_padding);
        let extent = &self.config.extent;

        let points: Vec<SeriesPoint> = logged
            .into_iter()
            .map(|(date, relative)| {
                let value = variable.absolute(relative);
                let x = time_range.to_pixel_x(date.and_time(chrono::NaiveTime::MIN), &plot);
                let y = extent.to_pixel_y(extent.normalize(value, &domain), &plot);
                SeriesPoint {
                    position: DVec2::new(x, y),
                    date,
                    value,
                    relative,
                }
            })
            .collect();

        let positions: Vec<DVec2> = points.iter().map(|p| p.position).collect();
        let path = monotone_path(&positions);
        tracing::trace!(
            variable = %variable.id,
            points = points.len(),
            min = domain.min,
            max = domain.max,
            "built series"
        );

        Series {
            variable_id: variable.id.clone(),
            label: variable.label.clone(),
            color: variable.color.clone(),
            marker: variable.marker,
            domain,
            points,
            path,
            style: SeriesStyle::for_variable(&variable.id, active, &self.config.emphasis),
        }
    }

    fn empty_series(&self, variable: &Variable, active: Option<&str>) -> Series {
        Series {
            variable_id: variable.id.clone(),
            label: variable.label.clone(),
            color: variable.color.clone(),
            marker: variable.marker,
            domain: graph_domain(variable, &[], self.config.domain_padding),
            points: Vec::new(),
            path: Path::new(),
            style: SeriesStyle::for_variable(&variable.id, active, &self.config.emphasis),
        }
    }
}

/// Min..max date of an ascending history, `None` when empty.
fn history_time_range(filtered: &[HistoryEntry]) -> Option<TimeRange> {
    let first = filtered.first()?.date;
    let last = filtered.last()?.date;
    Some(TimeRange::from_dates(first, last))
}

fn log_unknown_ids(variables: &[&Variable], filtered: &[HistoryEntry], active: Option<&str>) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let known: AHashSet<&str> = variables.iter().map(|v| v.id.as_str()).collect();
    let unknown: AHashSet<&str> = filtered
        .iter()
        .flat_map(|entry| entry.values.keys())
        .map(String::as_str)
        .filter(|id| !known.contains(id))
        .collect();
    if !unknown.is_empty() {
        tracing::debug!(?unknown, "Ignoring history values for unknown variables");
    }
    if let Some(id) = active.filter(|id| !known.contains(id)) {
        tracing::debug!(active = id, "Active variable is not being graphed");
    }
}
