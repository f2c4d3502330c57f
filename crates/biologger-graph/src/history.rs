//! Logged observations.
//!
//! [`LogEntry`] is one raw slider submission; [`HistoryEntry`] is one day's
//! bucket of relative values, the unit the graph pipeline works on.

use crate::variable::{LoggingMode, VariableLibrary};
use chrono::{Days, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Relative values keyed by variable id. `None` (JSON `null`) means not logged.
pub type ValueMap = IndexMap<String, Option<f64>, ahash::RandomState>;

/// One observation bucket: the relative values logged on `date`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: ValueMap,
}

impl HistoryEntry {
    /// An entry with no values.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: ValueMap::default(),
        }
    }

    /// Add (or replace) a relative value.
    pub fn with_value(mut self, variable_id: impl Into<String>, value: f64) -> Self {
        self.values.insert(variable_id.into(), Some(value));
        self
    }

    /// Mark a variable as explicitly not logged.
    pub fn with_missing(mut self, variable_id: impl Into<String>) -> Self {
        self.values.insert(variable_id.into(), None);
        self
    }

    /// The logged relative value for a variable, if present and finite.
    pub fn value(&self, variable_id: &str) -> Option<f64> {
        self.values
            .get(variable_id)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    /// Iterate over the logged (present, finite) values.
    pub fn logged(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().filter_map(|(id, value)| match value {
            Some(v) if v.is_finite() => Some((id.as_str(), *v)),
            _ => None,
        })
    }

    /// Whether nothing was logged in this entry.
    pub fn is_empty(&self) -> bool {
        self.logged().next().is_none()
    }
}

/// Parse a JSON array of history entries (`[{"date": "2025-01-31", "values": {...}}]`).
#[cfg(feature = "serde")]
pub fn history_from_json(json: &str) -> crate::GraphResult<Vec<HistoryEntry>> {
    Ok(serde_json::from_str(json)?)
}

/// A single raw value submission.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LogEntry {
    pub variable_id: String,
    /// Relative value (deviation from baseline).
    pub value: f64,
    pub timestamp: NaiveDateTime,
}

impl LogEntry {
    pub fn new(variable_id: impl Into<String>, value: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            variable_id: variable_id.into(),
            value,
            timestamp,
        }
    }

    /// Calendar day the entry belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Collapse raw log entries into one history entry per day.
///
/// Covers the `days` days ending at `reference_date` (inclusive); days with no
/// logged values are omitted. When a variable was logged several times on one
/// day, point-in-time variables keep the latest entry and summary variables
/// are averaged. Entries for ids missing from `library` are skipped.
pub fn entries_to_history(
    entries: &[LogEntry],
    library: &VariableLibrary,
    reference_date: NaiveDate,
    days: u32,
) -> Vec<HistoryEntry> {
    if days == 0 {
        return Vec::new();
    }
    let first_day = reference_date
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .unwrap_or(NaiveDate::MIN);

    let mut by_day: BTreeMap<NaiveDate, IndexMap<&str, Vec<&LogEntry>, ahash::RandomState>> =
        BTreeMap::new();
    let mut skipped = 0usize;
    for entry in entries {
        let date = entry.date();
        if date < first_day || date > reference_date || !entry.value.is_finite() {
            continue;
        }
        if !library.contains(&entry.variable_id) {
            skipped += 1;
            continue;
        }
        by_day
            .entry(date)
            .or_default()
            .entry(entry.variable_id.as_str())
            .or_default()
            .push(entry);
    }
    if skipped > 0 {
        tracing::debug!(skipped, "ignored log entries for unknown variables");
    }

    by_day
        .into_iter()
        .map(|(date, per_variable)| {
            let mut day = HistoryEntry::new(date);
            for (id, logged) in per_variable {
                let Some(variable) = library.get(id) else {
                    continue;
                };
                let value = match variable.logging_mode {
                    // Ties on timestamp go to the entry logged first.
                    LoggingMode::PointInTime => logged
                        .iter()
                        .rev()
                        .max_by_key(|e| e.timestamp)
                        .map(|e| e.value),
                    LoggingMode::Summary => {
                        Some(logged.iter().map(|e| e.value).sum::<f64>() / logged.len() as f64)
                    }
                };
                if let Some(value) = value {
                    day.values.insert(id.to_string(), Some(value));
                }
            }
            day
        })
        .collect()
}
