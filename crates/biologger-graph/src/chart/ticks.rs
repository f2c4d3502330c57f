//! Axis tick generation for the value axis and the time axis.

use super::domain::Domain;
use super::rect::Rect;
use super::scale::NormalizedExtent;
use super::viewport::ViewportSpec;
use crate::variable::{Variable, decimal_places_of};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// A labelled position on the value axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueTick {
    /// Absolute value at the tick.
    pub value: f64,
    /// The value mapped through the normalized extent.
    pub normalized_y: f64,
    pub label: String,
}

/// Round a raw interval to 1, 2, 5 or 10 times a power of ten.
pub fn nice_interval(rough: f64) -> f64 {
    if !(rough.is_finite() && rough > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(rough.log10().floor());
    let normalized = rough / magnitude;

    if normalized < 1.5 {
        magnitude
    } else if normalized < 3.0 {
        2.0 * magnitude
    } else if normalized < 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    }
}

/// Tick spacing for `range` aiming at about `target` ticks.
///
/// With a step size the spacing is the smallest multiple of it that keeps the
/// count near `target`; without one it is a [`nice_interval`].
pub fn tick_spacing(range: f64, step: Option<f64>, target: usize) -> f64 {
    let target = target.max(1) as f64;
    match step {
        Some(step) if step.is_finite() && step > 0.0 => {
            let multiple = (range / (step * target) - 1e-9).ceil().max(1.0);
            snap(step * multiple, decimal_places_of(step))
        }
        _ => {
            let nice = nice_interval(range / target);
            snap(nice, (-nice.log10().floor()).max(0.0) as usize)
        }
    }
}

/// Generate value-axis ticks for `domain`.
///
/// Ticks start at the first multiple of the spacing at or above `domain.min`
/// and stop at `domain.max`, with at most `target + 2` ticks. Values are
/// snapped to the spacing's precision. Labels carry no unit; see
/// [`variable_ticks`] for labelled ticks.
pub fn value_ticks(
    domain: &Domain,
    step: Option<f64>,
    target: usize,
    extent: &NormalizedExtent,
) -> Vec<ValueTick> {
    if !(domain.min.is_finite() && domain.max.is_finite()) {
        return Vec::new();
    }
    if domain.is_degenerate() {
        let value = domain.min;
        return vec![ValueTick {
            value,
            normalized_y: extent.normalize(value, domain),
            label: value.to_string(),
        }];
    }

    let spacing = tick_spacing(domain.span(), step, target);
    let decimals = decimal_places_of(spacing);
    let tolerance = spacing * 1e-9;
    let first = ((domain.min - tolerance) / spacing).ceil();

    (0..target.max(1).saturating_add(2))
        .map(|i| snap((first + i as f64) * spacing, decimals))
        .take_while(|&value| value <= domain.max + tolerance)
        .map(|value| ValueTick {
            value,
            normalized_y: extent.normalize(value, domain),
            label: format!("{:.*}", decimals, value),
        })
        .collect()
}

/// Value-axis ticks for a variable, labelled with its precision and unit.
pub fn variable_ticks(
    variable: &Variable,
    domain: &Domain,
    target: usize,
    extent: &NormalizedExtent,
) -> Vec<ValueTick> {
    let mut ticks = value_ticks(domain, Some(variable.step_size), target, extent);
    for tick in &mut ticks {
        tick.label = variable.format_value(tick.value);
    }
    ticks
}

fn snap(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let snapped = (value * scale).round() / scale;
    // Avoid "-0" labels.
    if snapped == 0.0 { 0.0 } else { snapped }
}

/// Inclusive time span shown on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// Create a range, swapping the ends if they arrive inverted.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Range from the midnight of `first` to the midnight of `last`.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Self {
        Self::new(first.and_time(chrono::NaiveTime::MIN), last.and_time(chrono::NaiveTime::MIN))
    }

    pub fn span(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.span() <= TimeDelta::zero()
    }

    /// Pixel x of `at` inside `plot`. An empty range maps everything to the
    /// left edge.
    pub fn to_pixel_x(&self, at: NaiveDateTime, plot: &Rect) -> f64 {
        if self.is_empty() {
            return plot.x;
        }
        let offset = (at - self.start).num_milliseconds() as f64;
        let span = self.span().num_milliseconds() as f64;
        plot.x + offset / span * plot.width
    }

    /// The instant `fraction` of the way from `start` to `end`.
    pub fn lerp(&self, fraction: f64) -> NaiveDateTime {
        let millis = (self.span().num_milliseconds() as f64 * fraction).round() as i64;
        TimeDelta::try_milliseconds(millis)
            .and_then(|delta| self.start.checked_add_signed(delta))
            .unwrap_or(self.start)
    }
}

/// A labelled position on the time axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeTick {
    pub x: f64,
    pub at: NaiveDateTime,
    pub label: String,
}

/// Number of time ticks that fit `width` pixels at `min_spacing` apart.
///
/// Starts from the viewport's preferred count and never drops below 2.
pub fn time_tick_count(viewport: &ViewportSpec, width: f64, min_spacing: f64) -> usize {
    let preferred = viewport.time_tick_count.max(2);
    if min_spacing > 0.0 && width.is_finite() && width > 0.0 {
        let fit = (width / min_spacing).floor() as usize + 1;
        preferred.min(fit).max(2)
    } else {
        preferred
    }
}

/// Evenly spaced time-axis ticks across `plot`.
///
/// An empty range (a single day of data) is labelled as if it covered the
/// viewport's window starting at `range.start`, matching points that sit on
/// the left edge.
pub fn time_ticks(
    range: &TimeRange,
    viewport: &ViewportSpec,
    plot: &Rect,
    min_spacing: f64,
) -> Vec<TimeTick> {
    let labelled = if range.is_empty() {
        let window = TimeDelta::try_days(i64::from(viewport.window_days.max(1)))
            .unwrap_or(TimeDelta::zero());
        TimeRange::new(
            range.start,
            range.start.checked_add_signed(window).unwrap_or(range.start),
        )
    } else {
        *range
    };

    let count = time_tick_count(viewport, plot.width, min_spacing);
    (0..count)
        .map(|i| {
            let fraction = i as f64 / (count - 1) as f64;
            let at = labelled.lerp(fraction);
            TimeTick {
                x: plot.x + fraction * plot.width,
                at,
                label: viewport.label_format.format(at),
            }
        })
        .collect()
}
