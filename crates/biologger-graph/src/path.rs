//! Path primitives handed to the rendering surface.
//!
//! A path is a sequence of drawing commands. Its [`Display`](std::fmt::Display)
//! form is an SVG path `d` attribute, e.g. `M 0 0 C 1 1, 2 2, 3 3`.

use crate::CubicBezier;
use glam::DVec2;
use std::fmt;

/// A command in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCommand {
    /// Move to a new position without drawing.
    MoveTo(DVec2),
    /// Draw a line to a position.
    LineTo(DVec2),
    /// Draw a cubic Bezier curve.
    CubicTo {
        /// First control point
        control1: DVec2,
        /// Second control point
        control2: DVec2,
        /// End point
        to: DVec2,
    },
    /// Close the current sub-path by drawing a line to the start.
    Close,
}

/// A 2D path consisting of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the commands in this path.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Get the bounding box of the path.
    ///
    /// Control points are included, so the box is conservative for curves.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(to) | PathCommand::LineTo(to) => {
                    min = min.min(*to);
                    max = max.max(*to);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    min = min.min(*control1).min(*control2).min(*to);
                    max = max.max(*control1).max(*control2).max(*to);
                }
                PathCommand::Close => {}
            }
        }

        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Iterate over the cubic segments of the path, with their start points resolved.
    pub fn cubic_curves(&self) -> impl Iterator<Item = CubicBezier> + '_ {
        let mut current = DVec2::ZERO;
        self.commands.iter().filter_map(move |cmd| match cmd {
            PathCommand::MoveTo(to) | PathCommand::LineTo(to) => {
                current = *to;
                None
            }
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => {
                let curve = CubicBezier::new(current, *control1, *control2, *to);
                current = *to;
                Some(curve)
            }
            PathCommand::Close => None,
        })
    }

    /// Render the SVG `d` attribute for this path.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y)?,
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => write!(
                    f,
                    "C {} {}, {} {}, {} {}",
                    control1.x, control1.y, control2.x, control2.y, to.x, to.y
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Builder for constructing paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

/// Control-point distance that approximates a quarter circle with one cubic.
const CIRCLE_KAPPA: f64 = 0.552_284_749_830_793_4;

impl PathBuilder {
    /// Create a new path builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new position without drawing.
    pub fn move_to(&mut self, to: DVec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    /// Draw a line to a position.
    pub fn line_to(&mut self, to: DVec2) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    /// Draw a cubic Bezier curve.
    pub fn cubic_to(&mut self, control1: DVec2, control2: DVec2, to: DVec2) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            to,
        });
        self
    }

    /// Close the current sub-path.
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Add a rectangle to the path.
    pub fn rect(&mut self, position: DVec2, size: DVec2) -> &mut Self {
        self.move_to(position);
        self.line_to(position + DVec2::new(size.x, 0.0));
        self.line_to(position + size);
        self.line_to(position + DVec2::new(0.0, size.y));
        self.close()
    }

    /// Add a circle made of four cubic quarter arcs.
    pub fn circle(&mut self, center: DVec2, radius: f64) -> &mut Self {
        let k = radius * CIRCLE_KAPPA;
        let right = center + DVec2::new(radius, 0.0);
        let bottom = center + DVec2::new(0.0, radius);
        let left = center + DVec2::new(-radius, 0.0);
        let top = center + DVec2::new(0.0, -radius);

        self.move_to(right);
        self.cubic_to(right + DVec2::new(0.0, k), bottom + DVec2::new(k, 0.0), bottom);
        self.cubic_to(bottom - DVec2::new(k, 0.0), left + DVec2::new(0.0, k), left);
        self.cubic_to(left - DVec2::new(0.0, k), top - DVec2::new(k, 0.0), top);
        self.cubic_to(top + DVec2::new(k, 0.0), right - DVec2::new(0.0, k), right);
        self.close()
    }

    /// Add a closed polygon to the path.
    pub fn polygon(&mut self, points: &[DVec2]) -> &mut Self {
        let Some((first, rest)) = points.split_first() else {
            return self;
        };

        self.move_to(*first);
        for point in rest {
            self.line_to(*point);
        }
        self.close()
    }

    /// Build the path.
    pub fn build(self) -> Path {
        Path {
            commands: self.commands,
        }
    }
}
