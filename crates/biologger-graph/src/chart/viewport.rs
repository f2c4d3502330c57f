//! Named time windows and the history filter/aggregator applied before
//! anything is drawn.

use crate::error::{GraphError, GraphResult};
use crate::history::HistoryEntry;
use chrono::{Days, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// How time-axis labels are written for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeLabelFormat {
    /// `14:30`
    TimeOfDay,
    /// `Mon`
    Weekday,
    /// `07`
    DayOfMonth,
    /// `Jan`
    MonthAbbrev,
}

impl TimeLabelFormat {
    /// The `chrono` format string for this label style.
    pub fn pattern(&self) -> &'static str {
        match self {
            TimeLabelFormat::TimeOfDay => "%H:%M",
            TimeLabelFormat::Weekday => "%a",
            TimeLabelFormat::DayOfMonth => "%d",
            TimeLabelFormat::MonthAbbrev => "%b",
        }
    }

    pub fn format(&self, at: NaiveDateTime) -> String {
        at.format(self.pattern()).to_string()
    }
}

/// A named time window plus its aggregation policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSpec {
    pub name: String,
    /// Lookback length; entries dated `>= reference - window_days` are kept.
    pub window_days: u32,
    /// Average same-day entries into one bucket.
    pub aggregate: bool,
    /// Preferred number of time-axis ticks.
    pub time_tick_count: usize,
    pub label_format: TimeLabelFormat,
}

impl ViewportSpec {
    pub fn new(
        name: impl Into<String>,
        window_days: u32,
        aggregate: bool,
        time_tick_count: usize,
        label_format: TimeLabelFormat,
    ) -> Self {
        Self {
            name: name.into(),
            window_days,
            aggregate,
            time_tick_count,
            label_format,
        }
    }

    /// First date still inside the window ending at `reference_date`.
    pub fn window_start(&self, reference_date: NaiveDate) -> NaiveDate {
        reference_date
            .checked_sub_days(Days::new(u64::from(self.window_days)))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Immutable lookup table of viewports, keyed by lowercase name.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTable {
    viewports: IndexMap<String, ViewportSpec>,
}

impl Default for ViewportTable {
    fn default() -> Self {
        use TimeLabelFormat::*;
        Self::from_specs([
            ViewportSpec::new("day", 1, false, 7, TimeOfDay),
            ViewportSpec::new("week", 7, false, 7, Weekday),
            ViewportSpec::new("month", 30, true, 5, DayOfMonth),
            ViewportSpec::new("year", 365, true, 4, MonthAbbrev),
        ])
    }
}

impl ViewportTable {
    /// Build a table. A later viewport with the same (case-insensitive) name
    /// replaces an earlier one.
    pub fn from_specs(specs: impl IntoIterator<Item = ViewportSpec>) -> Self {
        Self {
            viewports: specs
                .into_iter()
                .map(|spec| (spec.name.to_lowercase(), spec))
                .collect(),
        }
    }

    /// Look up a viewport by name, ignoring case.
    pub fn get(&self, name: &str) -> GraphResult<&ViewportSpec> {
        self.viewports
            .get(&name.to_lowercase())
            .ok_or_else(|| GraphError::UnknownViewport(name.to_string()))
    }

    /// Viewport names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.viewports.values().map(|spec| spec.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.viewports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewports.is_empty()
    }
}

/// Restrict `history` to the viewport window ending at `reference_date`.
///
/// The result is sorted ascending by date. For aggregating viewports, entries
/// sharing a calendar day are merged: each variable's value is the mean of the
/// values actually logged that day. A variable with nothing logged is left out
/// of the merged entry rather than counted as zero.
///
/// The input is never modified.
pub fn filter_history(
    history: &[HistoryEntry],
    viewport: &ViewportSpec,
    reference_date: NaiveDate,
) -> Vec<HistoryEntry> {
    let start = viewport.window_start(reference_date);
    let in_window = history.iter().filter(|entry| entry.date >= start);

    if !viewport.aggregate {
        let mut kept: Vec<HistoryEntry> = in_window.cloned().collect();
        kept.sort_by_key(|entry| entry.date);
        return kept;
    }

    let mut days: BTreeMap<NaiveDate, IndexMap<&str, (f64, usize), ahash::RandomState>> =
        BTreeMap::new();
    for entry in in_window {
        let sums = days.entry(entry.date).or_default();
        for (id, value) in entry.logged() {
            let slot = sums.entry(id).or_insert((0.0, 0));
            slot.0 += value;
            slot.1 += 1;
        }
    }

    days.into_iter()
        .map(|(date, sums)| {
            let mut merged = HistoryEntry::new(date);
            for (id, (sum, count)) in sums {
                merged
                    .values
                    .insert(id.to_string(), Some(sum / count as f64));
            }
            merged
        })
        .collect()
}
