//! Per-variable value domains.
//!
//! A domain is the absolute `[min, max]` range one variable is normalized
//! against for the current view. Each variable gets its own domain, which is
//! what lets series with unrelated units share one vertical axis.

use crate::variable::{LoggingMode, Variable};

/// Half-width substituted around a single value when a domain has no span.
pub const DEGENERATE_HALF_SPAN: f64 = 1.0;

/// Absolute value range for one variable, `max >= min`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Create a domain, swapping the bounds if they arrive inverted.
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Width of the domain.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the domain.
    #[inline]
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Whether the domain has zero width. Narrow domains are still usable.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Whether `value` lies inside the domain (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Smallest domain covering both `self` and `other`.
    pub fn union(&self, other: &Domain) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow both ends by `fraction` of the span.
    pub fn padded(&self, fraction: f64) -> Self {
        let pad = self.span() * fraction.max(0.0);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Replace a zero-width domain with `value ± DEGENERATE_HALF_SPAN`.
    pub fn or_fallback(self) -> Self {
        if self.is_degenerate() {
            tracing::debug!(value = self.min, "degenerate domain, substituting fallback span");
            Self {
                min: self.min - DEGENERATE_HALF_SPAN,
                max: self.max + DEGENERATE_HALF_SPAN,
            }
        } else {
            self
        }
    }
}

/// Compute the graph domain of `variable` given its logged relative values.
///
/// - `Summary` variables always get their configured band; outliers never
///   move the scale.
/// - `PointInTime` variables with no finite observations get the band too.
///   Otherwise the band is widened to cover every observed absolute value, and
///   then grown by `padding` (a fraction of the span) so extremes are not drawn
///   flush against the frame.
///
/// A zero-width result is replaced by a `±1` span around its value.
pub fn graph_domain(variable: &Variable, relative_values: &[f64], padding: f64) -> Domain {
    let band = variable.band();
    if variable.logging_mode == LoggingMode::Summary {
        return band.or_fallback();
    }

    let observed = relative_values
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| variable.absolute(v))
        .fold(None, |acc: Option<Domain>, v| match acc {
            Some(d) => Some(Domain {
                min: d.min.min(v),
                max: d.max.max(v),
            }),
            None => Some(Domain { min: v, max: v }),
        });

    match observed {
        Some(data) => band.union(&data).padded(padding).or_fallback(),
        None => band.or_fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodyweight(mode: LoggingMode) -> Variable {
        Variable::new("bodyweight", "BODYWEIGHT", 80.0, 10.0, 0.5).with_mode(mode)
    }

    #[test]
    fn test_summary_domain_is_fixed() {
        let var = bodyweight(LoggingMode::Summary);
        assert_eq!(graph_domain(&var, &[], 0.0), Domain::new(70.0, 90.0));
        assert_eq!(graph_domain(&var, &[-40.0, 55.0], 0.1), Domain::new(70.0, 90.0));
    }

    #[test]
    fn test_point_in_time_without_data_uses_band() {
        let var = bodyweight(LoggingMode::PointInTime);
        assert_eq!(graph_domain(&var, &[], 0.1), Domain::new(70.0, 90.0));
    }

    #[test]
    fn test_point_in_time_expands_to_data() {
        let var = bodyweight(LoggingMode::PointInTime);
        let domain = graph_domain(&var, &[-15.0, 5.0], 0.0);
        assert_eq!(domain, Domain::new(65.0, 90.0));
    }

    #[test]
    fn test_point_in_time_padding() {
        let var = bodyweight(LoggingMode::PointInTime);
        let domain = graph_domain(&var, &[-15.0, 5.0], 0.1);
        assert!((domain.min - 62.5).abs() < 1e-9);
        assert!((domain.max - 92.5).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_values_are_ignored() {
        let var = bodyweight(LoggingMode::PointInTime);
        let domain = graph_domain(&var, &[f64::NAN, f64::INFINITY], 0.0);
        assert_eq!(domain, Domain::new(70.0, 90.0));
    }

    #[test]
    fn test_degenerate_bounds_fall_back() {
        let var = Variable::new("flat", "FLAT", 5.0, 1.0, 1.0).with_bounds(5.0, 5.0);
        let domain = graph_domain(&var, &[], 0.0);
        assert_eq!(domain, Domain::new(4.0, 6.0));
        assert!(!domain.is_degenerate());
    }

    #[test]
    fn test_tiny_summary_band_is_kept() {
        let var = Variable::new("trace", "TRACE", 2e-20, 1e-20, 1e-21)
            .with_mode(LoggingMode::Summary)
            .with_bounds(1e-20, 3e-20);
        let domain = graph_domain(&var, &[], 0.0);
        assert_eq!(domain, Domain::new(1e-20, 3e-20));
        assert!(!domain.is_degenerate());
    }

    #[test]
    fn test_new_orders_bounds() {
        assert_eq!(Domain::new(3.0, 1.0), Domain { min: 1.0, max: 3.0 });
    }
}
