//! Cosmetic parameters of the graph pipeline.

use crate::chart::{Insets, NormalizedExtent};

/// Stroke and opacity applied to active and inactive series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmphasisStyle {
    pub active_stroke_width: f64,
    pub inactive_stroke_width: f64,
    pub active_opacity: f64,
    pub inactive_opacity: f64,
}

impl Default for EmphasisStyle {
    fn default() -> Self {
        Self {
            active_stroke_width: 2.5,
            inactive_stroke_width: 1.5,
            active_opacity: 1.0,
            inactive_opacity: 0.25,
        }
    }
}

/// Configuration for [`SeriesBuilder`](crate::chart::SeriesBuilder).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Shared normalized band every variable maps into.
    pub extent: NormalizedExtent,
    /// Fraction of the span added to both ends of data-derived domains.
    pub domain_padding: f64,
    /// Preferred number of value-axis ticks.
    pub value_tick_target: usize,
    /// Minimum distance between time-axis ticks, in pixels.
    pub min_time_tick_spacing: f64,
    /// Padding between the graph bounds and the plot area.
    pub insets: Insets,
    pub emphasis: EmphasisStyle,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            extent: NormalizedExtent::DEFAULT,
            domain_padding: 0.0,
            value_tick_target: 6,
            min_time_tick_spacing: 40.0,
            insets: Insets::default(),
            emphasis: EmphasisStyle::default(),
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-apply the setter checks to every field, replacing rejected values
    /// with their defaults.
    ///
    /// Deserialized configs and configs with directly assigned fields bypass
    /// the `with_*` setters; [`SeriesBuilder::new`](crate::chart::SeriesBuilder::new)
    /// runs this before using a config.
    pub fn validated(self) -> Self {
        Self::default()
            .with_extent(self.extent)
            .with_domain_padding(self.domain_padding)
            .with_value_tick_target(self.value_tick_target)
            .with_min_time_tick_spacing(self.min_time_tick_spacing)
            .with_insets(self.insets)
            .with_emphasis(self.emphasis)
    }

    /// Set the normalized extent. Rejects empty, inverted or non-finite extents.
    pub fn with_extent(mut self, extent: NormalizedExtent) -> Self {
        if extent.is_valid() {
            self.extent = extent;
        } else {
            tracing::warn!(?extent, "Rejected normalized extent, keeping {:?}", self.extent);
        }
        self
    }

    /// Set the proportional domain padding. Rejects negative or non-finite values.
    pub fn with_domain_padding(mut self, padding: f64) -> Self {
        if padding.is_finite() && padding >= 0.0 {
            self.domain_padding = padding;
        } else {
            tracing::warn!(padding, "Rejected domain padding, keeping {}", self.domain_padding);
        }
        self
    }

    /// Set the preferred value tick count. Rejects zero.
    pub fn with_value_tick_target(mut self, target: usize) -> Self {
        if target > 0 {
            self.value_tick_target = target;
        } else {
            tracing::warn!("Rejected zero value tick target, keeping {}", self.value_tick_target);
        }
        self
    }

    /// Set the minimum time tick spacing. Rejects negative or non-finite values.
    pub fn with_min_time_tick_spacing(mut self, spacing: f64) -> Self {
        if spacing.is_finite() && spacing >= 0.0 {
            self.min_time_tick_spacing = spacing;
        } else {
            tracing::warn!(
                spacing,
                "Rejected time tick spacing, keeping {}",
                self.min_time_tick_spacing
            );
        }
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_emphasis(mut self, emphasis: EmphasisStyle) -> Self {
        self.emphasis = emphasis;
        self
    }
}
