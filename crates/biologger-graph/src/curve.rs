//! Cubic Bezier segments.
//!
//! Paths emitted by the curve generator are sequences of these segments; the
//! type is also used to evaluate a rendered curve, e.g. to check it against
//! the data it was fitted to.

use glam::DVec2;

/// A cubic Bezier curve (two control points).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier {
    /// Start point
    pub from: DVec2,
    /// First control point
    pub control1: DVec2,
    /// Second control point
    pub control2: DVec2,
    /// End point
    pub to: DVec2,
}

impl CubicBezier {
    /// Create a new cubic Bezier curve.
    pub fn new(from: DVec2, control1: DVec2, control2: DVec2, to: DVec2) -> Self {
        Self {
            from,
            control1,
            control2,
            to,
        }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f64) -> DVec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        self.from * mt3
            + self.control1 * (3.0 * mt2 * t)
            + self.control2 * (3.0 * mt * t2)
            + self.to * t3
    }

    /// Exact (min, max) of the curve's y coordinate over t in [0, 1].
    ///
    /// Checks both endpoints plus every interior root of dy/dt.
    pub fn y_extent(&self) -> (f64, f64) {
        let d0 = self.control1.y - self.from.y;
        let d1 = self.control2.y - self.control1.y;
        let d2 = self.to.y - self.control2.y;

        // dy/dt / 3 = a t^2 + b t + c
        let a = d0 - 2.0 * d1 + d2;
        let b = 2.0 * (d1 - d0);
        let c = d0;

        let mut min = self.from.y.min(self.to.y);
        let mut max = self.from.y.max(self.to.y);
        let mut consider = |t: f64| {
            if t > 0.0 && t < 1.0 {
                let y = self.eval(t).y;
                min = min.min(y);
                max = max.max(y);
            }
        };

        if a.abs() < 1e-12 {
            if b.abs() > 1e-12 {
                consider(-c / b);
            }
        } else {
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sqrt = disc.sqrt();
                consider((-b + sqrt) / (2.0 * a));
                consider((-b - sqrt) / (2.0 * a));
            }
        }

        (min, max)
    }

    /// Whether all four points lie on one straight line.
    pub fn is_linear(&self, tolerance: f64) -> bool {
        let dir = self.to - self.from;
        let len = dir.length();
        if len < f64::EPSILON {
            return (self.control1 - self.from).length() <= tolerance
                && (self.control2 - self.from).length() <= tolerance;
        }
        let off_line = |p: DVec2| (dir.perp_dot(p - self.from) / len).abs();
        off_line(self.control1) <= tolerance && off_line(self.control2) <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_endpoints() {
        let curve = CubicBezier::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(25.0, 100.0),
            DVec2::new(75.0, 100.0),
            DVec2::new(100.0, 0.0),
        );

        assert_eq!(curve.eval(0.0), curve.from);
        assert_eq!(curve.eval(1.0), curve.to);
    }

    #[test]
    fn test_y_extent_finds_interior_peak() {
        let curve = CubicBezier::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(25.0, 100.0),
            DVec2::new(75.0, 100.0),
            DVec2::new(100.0, 0.0),
        );

        let (min, max) = curve.y_extent();
        assert_eq!(min, 0.0);
        assert!((max - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_extent_of_monotone_segment_is_endpoints() {
        let curve = CubicBezier::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(3.0, 3.0),
        );

        assert_eq!(curve.y_extent(), (0.0, 3.0));
    }

    #[test]
    fn test_is_linear() {
        let straight = CubicBezier::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(2.0, 4.0),
            DVec2::new(3.0, 6.0),
        );
        assert!(straight.is_linear(1e-9));

        let bent = CubicBezier::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 3.0),
            DVec2::new(2.0, 4.0),
            DVec2::new(3.0, 6.0),
        );
        assert!(!bent.is_linear(1e-9));
    }
}
