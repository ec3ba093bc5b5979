//! Metric → tile size mapping.

use cartogram_layout_models::LayoutConfig;
use cartogram_region_models::RegionTile;

/// Upper end of the metric domain (percent).
pub const METRIC_DOMAIN_MAX: f64 = 100.0;

/// Linear scale from the metric domain `0..=100` onto
/// `min_tile_size..=max_tile_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeScale {
    min: f64,
    max: f64,
}

impl SizeScale {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.min_tile_size, config.max_tile_size)
    }

    /// Maps a metric to a side length.
    ///
    /// Values outside the domain clamp to its ends; `NaN` is treated as 0.
    #[must_use]
    pub fn size_for(&self, metric: f64) -> f64 {
        let clamped = if metric.is_nan() {
            0.0
        } else {
            metric.clamp(0.0, METRIC_DOMAIN_MAX)
        };
        (self.max - self.min).mul_add(clamped / METRIC_DOMAIN_MAX, self.min)
    }

    /// Fills `tile_size` on every tile from its `metric_value`.
    #[must_use]
    pub fn apply(&self, tiles: Vec<RegionTile>) -> Vec<RegionTile> {
        tiles
            .into_iter()
            .map(|tile| RegionTile {
                tile_size: self.size_for(tile.metric_value),
                ..tile
            })
            .collect()
    }
}
