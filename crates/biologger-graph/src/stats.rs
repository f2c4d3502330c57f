//! Summary statistics over logged history: descriptive stats, week-over-week
//! trends and weekly compaction.

use crate::history::HistoryEntry;
use chrono::{Datelike, Days, NaiveDate};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Descriptive statistics of a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Upper median: the element at `count / 2` of the sorted values.
    pub median: f64,
    pub count: usize,
}

impl Stats {
    /// Compute statistics over the finite entries of `values`; `None` if there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Some(Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[count - 1],
            median: sorted[count / 2],
            count,
        })
    }
}

/// Direction of a week-over-week change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Week-over-week comparison of one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trend {
    pub this_week_avg: f64,
    pub last_week_avg: f64,
    pub change: f64,
    /// Change relative to `|last_week_avg|`, in percent. Zero when last
    /// week's mean is zero.
    pub change_pct: f64,
    pub direction: TrendDirection,
}

/// Compare the last 7 days against the 7 days before.
///
/// "This week" is `date >= reference - 7`, "last week" is
/// `reference - 14 <= date < reference - 7`. Returns `None` when either week
/// has nothing logged for the variable.
pub fn trend(history: &[HistoryEntry], variable_id: &str, reference_date: NaiveDate) -> Option<Trend> {
    let one_week_ago = reference_date.checked_sub_days(Days::new(7))?;
    let two_weeks_ago = reference_date.checked_sub_days(Days::new(14))?;

    let mut this_week = Vec::new();
    let mut last_week = Vec::new();
    for entry in history {
        let Some(value) = entry.value(variable_id) else {
            continue;
        };
        if entry.date >= one_week_ago {
            this_week.push(value);
        } else if entry.date >= two_weeks_ago {
            last_week.push(value);
        }
    }
    if this_week.is_empty() || last_week.is_empty() {
        return None;
    }

    let this_week_avg = this_week.iter().sum::<f64>() / this_week.len() as f64;
    let last_week_avg = last_week.iter().sum::<f64>() / last_week.len() as f64;
    let change = this_week_avg - last_week_avg;
    let change_pct = if last_week_avg != 0.0 {
        change / last_week_avg.abs() * 100.0
    } else {
        0.0
    };
    let direction = if change > 0.0 {
        TrendDirection::Up
    } else if change < 0.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    Some(Trend {
        this_week_avg,
        last_week_avg,
        change,
        change_pct,
        direction,
    })
}

/// One Sunday-to-Saturday week of history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekSummary {
    /// The Sunday the week starts on.
    pub week_start: NaiveDate,
    /// `week_start + 6` days.
    pub week_end: NaiveDate,
    /// Number of history entries that fell in the week.
    pub day_count: usize,
    /// Statistics per variable, in first-logged order.
    pub stats: IndexMap<String, Stats>,
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Collapse daily history into weekly summaries, ascending by week start.
pub fn compact_weekly(history: &[HistoryEntry]) -> Vec<WeekSummary> {
    let mut weeks: BTreeMap<NaiveDate, (usize, IndexMap<&str, Vec<f64>>)> = BTreeMap::new();
    for entry in history {
        let (days, values) = weeks.entry(week_start(entry.date)).or_default();
        *days += 1;
        for (id, value) in entry.logged() {
            values.entry(id).or_default().push(value);
        }
    }

    weeks
        .into_iter()
        .map(|(start, (day_count, values))| WeekSummary {
            week_start: start,
            week_end: start.checked_add_days(Days::new(6)).unwrap_or(start),
            day_count,
            stats: values
                .into_iter()
                .filter_map(|(id, values)| Some((id.to_string(), Stats::from_values(&values)?)))
                .collect(),
        })
        .collect()
}
