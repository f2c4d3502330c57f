//! Data point marker outlines.

use crate::variable::MarkerShape;
use crate::{Path, PathBuilder};
use glam::DVec2;

impl MarkerShape {
    /// Outline of the marker centered on `center`, `size` pixels across.
    pub fn to_path(&self, center: DVec2, size: f64) -> Path {
        let half = size.max(0.0) * 0.5;
        let mut builder = PathBuilder::new();
        match self {
            MarkerShape::Circle => {
                builder.circle(center, half);
            }
            MarkerShape::Square => {
                builder.rect(center - DVec2::splat(half), DVec2::splat(size.max(0.0)));
            }
            MarkerShape::Diamond => {
                builder.polygon(&[
                    center + DVec2::new(0.0, -half),
                    center + DVec2::new(half, 0.0),
                    center + DVec2::new(0.0, half),
                    center + DVec2::new(-half, 0.0),
                ]);
            }
            MarkerShape::Triangle => {
                // Apex up, y grows downward.
                builder.polygon(&[
                    center + DVec2::new(0.0, -half),
                    center + DVec2::new(half, half),
                    center + DVec2::new(-half, half),
                ]);
            }
            MarkerShape::Cross => {
                builder
                    .move_to(center + DVec2::new(-half, -half))
                    .line_to(center + DVec2::new(half, half))
                    .move_to(center + DVec2::new(half, -half))
                    .line_to(center + DVec2::new(-half, half));
            }
        }
        builder.build()
    }

    /// Whether the outline encloses an area that can be filled.
    pub fn is_filled(&self) -> bool {
        !matches!(self, MarkerShape::Cross)
    }
}
