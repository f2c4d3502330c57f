//! Test fixtures for biologger.
//!
//! Used by the integration tests and benches of `biologger-graph`:
//!
//! - [`init_logging`] - route `tracing` output through the test harness
//! - [`bodyweight`], [`mood`] - small, predictable variable definitions
//! - [`mock_history`] - deterministic daily history ending at a reference date
//! - [`assert_close`], [`assert_no_overshoot`] - float and curve assertions

use biologger_graph::{DVec2, HistoryEntry, LoggingMode, Path, Variable};
use chrono::{Days, NaiveDate};

/// Install the test log subscriber. Safe to call from every test.
pub fn init_logging() {
    biologger_core::logging::try_init_for_tests();
}

/// Shorthand for a calendar date. Panics on an invalid date.
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Bodyweight: baseline 80, band 70..90, step 0.5.
pub fn bodyweight(mode: LoggingMode) -> Variable {
    Variable::new("bodyweight", "BODYWEIGHT", 80.0, 10.0, 0.5)
        .with_unit("kg")
        .with_mode(mode)
}

/// Mood: a 0..10 summary rating around 5.
pub fn mood() -> Variable {
    Variable::new("mood", "MOOD", 5.0, 5.0, 1.0)
        .with_unit("/10")
        .with_mode(LoggingMode::Summary)
}

/// `days` consecutive daily entries ending at `reference` (inclusive),
/// ascending by date.
///
/// Values are smooth functions of the day offset `i` (days before
/// `reference`): `sleep = sin(i/5)*1.5`, `energy = cos(i/7)*2`,
/// `mood = sin(i/4)*2.5`, `bodyweight = i*0.05`.
pub fn mock_history(reference: NaiveDate, days: u32) -> Vec<HistoryEntry> {
    (0..days)
        .rev()
        .filter_map(|i| {
            let date = reference.checked_sub_days(Days::new(u64::from(i)))?;
            let i = f64::from(i);
            Some(
                HistoryEntry::new(date)
                    .with_value("sleep", (i / 5.0).sin() * 1.5)
                    .with_value("energy", (i / 7.0).cos() * 2.0)
                    .with_value("mood", (i / 4.0).sin() * 2.5)
                    .with_value("bodyweight", i * 0.05),
            )
        })
        .collect()
}

/// Assert `actual` is within `tolerance` of `expected`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}

/// Assert that every cubic segment of `path` stays within the y-range of the
/// two points it connects.
#[track_caller]
pub fn assert_no_overshoot(path: &Path, points: &[DVec2]) {
    let curves: Vec<_> = path.cubic_curves().collect();
    assert_eq!(
        curves.len(),
        points.len().saturating_sub(1),
        "one cubic per segment"
    );
    for (i, curve) in curves.iter().enumerate() {
        let (a, b) = (points[i], points[i + 1]);
        let (low, high) = (a.y.min(b.y), a.y.max(b.y));
        let (min_y, max_y) = curve.y_extent();
        let slack = 1e-9 * (1.0 + low.abs().max(high.abs()));
        assert!(
            min_y >= low - slack && max_y <= high + slack,
            "segment {i} spans y {min_y}..{max_y}, outside {low}..{high}"
        );
    }
}
