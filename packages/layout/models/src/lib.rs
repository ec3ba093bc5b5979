#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Layout configuration and the derived data handed to presentation layers.
//!
//! [`LayoutConfig`] holds every tunable constant of the layout engine. The
//! legend and summary types describe *what* a renderer should draw (bins,
//! reference sizes, tooltip figures) without prescribing how.

use cartogram_region_models::DateRange;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Tunable constants for the cartogram layout.
///
/// Deserializes from a partial TOML/JSON document: any field left out keeps
/// its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Tile side length for a metric of 0 (px).
    pub min_tile_size: f64,
    /// Tile side length for a metric of 100 (px).
    pub max_tile_size: f64,
    /// Nominal vertical pitch of one logical row (px).
    pub column_spacing_pitch: f64,
    /// X origin of the first column (px).
    pub starting_column_offset: f64,
    /// Number of bins in the tile color legend.
    pub num_color_bins: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_tile_size: 70.0,
            max_tile_size: 150.0,
            column_spacing_pitch: 80.0,
            starting_column_offset: 350.0,
            num_color_bins: 11,
        }
    }
}

impl LayoutConfig {
    /// Checks that the constants describe a usable layout.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfigError`] if a size is non-finite or negative,
    /// the size range is inverted, or there are no color bins.
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        let finite = [
            ("min_tile_size", self.min_tile_size),
            ("max_tile_size", self.max_tile_size),
            ("column_spacing_pitch", self.column_spacing_pitch),
            ("starting_column_offset", self.starting_column_offset),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(InvalidConfigError::new(field, format!("{value} is not finite")));
            }
        }
        if self.min_tile_size < 0.0 {
            return Err(InvalidConfigError::new(
                "min_tile_size",
                format!("{} is negative", self.min_tile_size),
            ));
        }
        if self.max_tile_size < self.min_tile_size {
            return Err(InvalidConfigError::new(
                "max_tile_size",
                format!(
                    "{} is smaller than min_tile_size {}",
                    self.max_tile_size, self.min_tile_size
                ),
            ));
        }
        if self.column_spacing_pitch <= 0.0 {
            return Err(InvalidConfigError::new(
                "column_spacing_pitch",
                format!("{} must be positive", self.column_spacing_pitch),
            ));
        }
        if self.num_color_bins == 0 {
            return Err(InvalidConfigError::new(
                "num_color_bins",
                "at least one bin is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error returned when a [`LayoutConfig`] fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidConfigError {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl InvalidConfigError {
    const fn new(field: &'static str, message: String) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for InvalidConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid layout config `{}`: {}", self.field, self.message)
    }
}

impl std::error::Error for InvalidConfigError {}

/// A filter notification delivered to a cartogram view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterSignal {
    /// The user selected a new time window.
    TimeRangeChanged {
        /// Selected window.
        range: DateRange,
    },
    /// The selection was removed; show the whole dataset.
    Cleared,
}

impl FilterSignal {
    /// The date range this signal selects, if any.
    #[must_use]
    pub const fn range(&self) -> Option<DateRange> {
        match self {
            Self::TimeRangeChanged { range } => Some(*range),
            Self::Cleared => None,
        }
    }
}

/// Which population group a color legend bin leans toward.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Majority {
    /// Bin lies entirely at or below a 0.5 non-white ratio.
    White,
    /// Bin straddles 0.5.
    Even,
    /// Bin lies entirely at or above a 0.5 non-white ratio.
    NonWhite,
}

/// One bin of the tile color legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorLegendBin {
    /// Lower non-white ratio bound.
    pub start: f64,
    /// Upper non-white ratio bound.
    pub end: f64,
    /// Value fed to the color scale for this swatch.
    pub midpoint: f64,
    /// Which group the bin leans toward.
    pub majority: Majority,
    /// Text shown under the swatch (e.g. "82–91%", "~50/50").
    pub label: String,
}

/// A reference square in the tile size legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeLegendEntry {
    /// Metric value this square represents.
    pub metric_value: f64,
    /// Side length the size mapper assigns to it.
    pub tile_size: f64,
    /// Text label (e.g. "25%", "≤1%").
    pub label: String,
}

/// One swatch of the pie overlay legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieLegendEntry {
    pub category: String,
    /// Position of the category in the pie color domain.
    pub color_index: usize,
}

/// Share of one sub-category within a region's non-white population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub count: u64,
    /// Rounded percentage of the non-white total.
    pub percent: u32,
}

/// Figures a tooltip or pie overlay shows for one positioned tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSummary {
    pub region_id: String,
    pub abbreviation: String,
    /// Rounded metric percentage.
    pub metric_percent: i64,
    /// The metric is the all-time mean, not the selected range's.
    pub metric_fallback: bool,
    /// Rounded white share of the population.
    pub white_percent: i64,
    /// Rounded non-white share of the population.
    pub non_white_percent: i64,
    /// Per-category share of the non-white population.
    pub category_shares: Vec<CategoryShare>,
    /// Tile center, where the pie overlay is anchored.
    pub center: (f64, f64),
    /// Where the abbreviation label is anchored.
    pub label_anchor: (f64, f64),
}
