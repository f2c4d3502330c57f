//! Mapping between absolute values, the shared normalized band and pixels.

use super::domain::Domain;
use super::rect::Rect;

/// The shared vertical band every variable is stretched into.
///
/// Symmetric around zero so a variable's domain center lands on the middle of
/// the plot regardless of its units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for NormalizedExtent {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl NormalizedExtent {
    pub const DEFAULT: Self = Self {
        min: -1.05,
        max: 1.05,
    };

    /// Create an extent. Callers are expected to pass `min < max`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Whether the extent can be mapped onto (finite, non-empty, ordered).
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    /// Map an absolute value from `domain` into this extent.
    ///
    /// A degenerate domain maps everything to the extent's center.
    pub fn normalize(&self, value: f64, domain: &Domain) -> f64 {
        if domain.is_degenerate() {
            return self.center();
        }
        (value - domain.min) / domain.span() * self.span() + self.min
    }

    /// Inverse of [`normalize`](Self::normalize).
    ///
    /// A degenerate domain, or an empty extent, maps everything back to
    /// `domain.min`.
    pub fn denormalize(&self, normalized: f64, domain: &Domain) -> f64 {
        if domain.is_degenerate() || !self.is_valid() {
            return domain.min;
        }
        (normalized - self.min) / self.span() * domain.span() + domain.min
    }

    /// Pixel y of a normalized value inside `plot` (y grows downward).
    ///
    /// An empty extent puts everything on the plot's vertical middle.
    pub fn to_pixel_y(&self, normalized: f64, plot: &Rect) -> f64 {
        if !self.is_valid() {
            return plot.y + plot.height * 0.5;
        }
        plot.y + (self.max - normalized) / self.span() * plot.height
    }

    /// Normalized value at pixel y inside `plot`.
    pub fn from_pixel_y(&self, pixel_y: f64, plot: &Rect) -> f64 {
        if plot.height <= 0.0 {
            return self.center();
        }
        self.max - (pixel_y - plot.y) / plot.height * self.span()
    }
}

/// Normalize into the default extent.
pub fn normalize(value: f64, domain: &Domain) -> f64 {
    NormalizedExtent::DEFAULT.normalize(value, domain)
}

/// Denormalize from the default extent.
pub fn denormalize(normalized: f64, domain: &Domain) -> f64 {
    NormalizedExtent::DEFAULT.denormalize(normalized, domain)
}
