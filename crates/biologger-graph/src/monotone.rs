//! Monotone cubic interpolation (Fritsch-Carlson).
//!
//! Produces one cubic segment per pair of neighbouring points. The curve
//! passes through every input point and never leaves the y-range of the two
//! points a segment connects, unlike a cardinal or Catmull-Rom spline.

use crate::{Path, PathBuilder};
use glam::DVec2;

/// Slopes below this magnitude are treated as a flat run.
pub const FLAT_SLOPE_EPSILON: f64 = 1e-6;

/// Build a smooth path through x-ascending points.
///
/// - 0 points: empty path
/// - 1 point: a lone `MoveTo`, rendered as a point marker
/// - 2+ points: `MoveTo` followed by one `CubicTo` per segment. Two points
///   yield a single cubic whose control points sit on the straight line, so
///   the segment is exactly linear.
pub fn monotone_path(points: &[DVec2]) -> Path {
    let mut builder = PathBuilder::new();
    let Some(first) = points.first() else {
        return builder.build();
    };
    builder.move_to(*first);

    let tangents = monotone_tangents(points);
    for (i, pair) in points.windows(2).enumerate() {
        let (p0, p1) = (pair[0], pair[1]);
        let dx = p1.x - p0.x;
        let control1 = DVec2::new(p0.x + dx / 3.0, p0.y + tangents[i] * dx / 3.0);
        let control2 = DVec2::new(p1.x - dx / 3.0, p1.y - tangents[i + 1] * dx / 3.0);
        builder.cubic_to(control1, control2, p1);
    }

    builder.build()
}

/// Tangent (dy/dx) at every point, after the monotonicity constraints.
///
/// Returns an empty vector for fewer than two points.
pub fn monotone_tangents(points: &[DVec2]) -> Vec<f64> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let slopes: Vec<f64> = points.windows(2).map(|p| secant(p[0], p[1])).collect();

    // Interior tangents average the neighbouring slopes, except at a change of
    // direction (or next to a flat run) where they are pinned to zero.
    let mut tangents = Vec::with_capacity(n);
    tangents.push(slopes[0]);
    for pair in slopes.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        if before * after <= 0.0 {
            tangents.push(0.0);
        } else {
            tangents.push((before + after) / 2.0);
        }
    }
    tangents.push(slopes[n - 2]);

    for (i, &slope) in slopes.iter().enumerate() {
        if slope.abs() < FLAT_SLOPE_EPSILON {
            tangents[i] = 0.0;
            tangents[i + 1] = 0.0;
            continue;
        }

        let alpha = tangents[i] / slope;
        let beta = tangents[i + 1] / slope;
        let s = alpha * alpha + beta * beta;
        if s > 9.0 {
            let tau = 3.0 / s.sqrt();
            tangents[i] = tau * alpha * slope;
            tangents[i + 1] = tau * beta * slope;
        }
    }

    tangents
}

/// Slope between two points; a zero or negative horizontal step counts as flat.
fn secant(p0: DVec2, p1: DVec2) -> f64 {
    let dx = p1.x - p0.x;
    if dx <= 0.0 {
        tracing::debug!(x0 = p0.x, x1 = p1.x, "non-increasing x in curve input, treating segment as flat");
        return 0.0;
    }
    (p1.y - p0.y) / dx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathCommand;

    fn pts(raw: &[(f64, f64)]) -> Vec<DVec2> {
        raw.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(monotone_path(&[]).is_empty());

        let single = monotone_path(&pts(&[(3.0, 4.0)]));
        assert_eq!(single.commands(), &[PathCommand::MoveTo(DVec2::new(3.0, 4.0))]);
        assert_eq!(single.to_svg(), "M 3 4");
    }

    #[test]
    fn test_two_points_are_a_straight_segment() {
        let path = monotone_path(&pts(&[(0.0, 0.0), (30.0, 60.0)]));

        assert_eq!(path.len(), 2);
        let curve = path.cubic_curves().next().unwrap();
        assert_eq!(curve.from, DVec2::new(0.0, 0.0));
        assert_eq!(curve.to, DVec2::new(30.0, 60.0));
        assert_eq!(curve.control1, DVec2::new(10.0, 20.0));
        assert_eq!(curve.control2, DVec2::new(20.0, 40.0));
        assert!(curve.is_linear(1e-9));
    }

    #[test]
    fn test_peak_tangent_is_zero() {
        let points = pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]);
        let tangents = monotone_tangents(&points);

        assert_eq!(tangents[1], 0.0);
        for curve in monotone_path(&points).cubic_curves() {
            let (min, max) = curve.y_extent();
            assert!(min >= -1e-9);
            assert!(max <= 10.0 + 1e-9);
        }
    }

    #[test]
    fn test_flat_run_pins_tangents() {
        let points = pts(&[(0.0, 0.0), (1.0, 5.0), (2.0, 5.0), (3.0, 9.0)]);
        let tangents = monotone_tangents(&points);

        assert_eq!(tangents[1], 0.0);
        assert_eq!(tangents[2], 0.0);
    }

    #[test]
    fn test_steep_tangents_are_scaled() {
        // Large jump next to a tiny rise: averaged tangent would be far steeper
        // than the small segment allows.
        let points = pts(&[(0.0, 0.0), (1.0, 0.1), (2.0, 100.0)]);
        let tangents = monotone_tangents(&points);

        let slope = 0.1;
        let alpha = tangents[0] / slope;
        let beta = tangents[1] / slope;
        assert!(alpha * alpha + beta * beta <= 9.0 + 1e-9);
    }

    #[test]
    fn test_passes_through_every_point() {
        let points = pts(&[(0.0, 3.0), (5.0, 1.0), (9.0, 4.0), (12.0, 4.5), (20.0, 2.0)]);
        let path = monotone_path(&points);

        let ends: Vec<DVec2> = path.cubic_curves().map(|c| c.to).collect();
        assert_eq!(ends, points[1..].to_vec());
        assert_eq!(path.commands()[0], PathCommand::MoveTo(points[0]));
    }

    #[test]
    fn test_duplicate_x_is_flat_not_nan() {
        let points = pts(&[(0.0, 0.0), (0.0, 5.0), (1.0, 6.0)]);
        let tangents = monotone_tangents(&points);

        assert!(tangents.iter().all(|t| t.is_finite()));
    }
}
