#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region record, demographic profile, and tile types.
//!
//! These types carry a region (US state) from raw time-series input through
//! the layout pipeline to the positioned tile that a renderer draws. Input
//! types are immutable; [`RegionTile`] is rebuilt from scratch on every
//! layout pass.

pub mod states;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw time-series observation for a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    /// Stable region identifier (the full state name, e.g. "Texas").
    pub region_id: String,
    /// Day this observation covers.
    pub date: NaiveDate,
    /// Observed metric, nominally a percentage in `0..=100`.
    pub metric_value: f64,
}

/// An inclusive date window used to filter [`RegionRecord`]s.
///
/// A range whose `start` is after its `end` is valid and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day included.
    pub start: NaiveDate,
    /// Last day included.
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the window (both bounds inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Count of people in a single sub-category of a region's population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category name (e.g. "Asian").
    pub category: String,
    /// Number of people.
    pub count: u64,
}

/// Static demographic data and grid placement for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicProfile {
    /// Region identifier, joined against [`RegionRecord::region_id`].
    pub region_id: String,
    /// Two-letter label drawn on the tile.
    pub abbreviation: String,
    /// Column in the abstract grid (0 = leftmost).
    pub logical_column: u32,
    /// Row in the abstract grid (0 = topmost).
    pub logical_row: u32,
    /// Share of the population that is non-white, in `0.0..=1.0`.
    pub non_white_ratio: f64,
    /// Breakdown of the non-white population, in display order.
    pub sub_category_counts: Vec<CategoryCount>,
}

/// Mean metric for one region over the selected records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAggregate {
    /// Region identifier.
    pub region_id: String,
    /// Arithmetic mean of the region's selected metric values.
    pub metric_value: f64,
}

/// A region's tile as produced by the layout pipeline.
///
/// `tile_size`, `x` and `y` are zero until the size mapper and grid engine
/// have run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTile {
    pub region_id: String,
    pub abbreviation: String,
    pub logical_column: u32,
    pub logical_row: u32,
    /// Aggregated metric driving the tile size.
    pub metric_value: f64,
    /// Side length of the square tile in pixels.
    pub tile_size: f64,
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Drives the tile color.
    pub non_white_ratio: f64,
    /// Drives the pie overlay.
    pub sub_category_counts: Vec<CategoryCount>,
    /// Set when the region had no records in the selected range and
    /// `metric_value` is its all-time mean instead.
    #[serde(default)]
    pub metric_fallback: bool,
}

impl RegionTile {
    /// Builds an unsized, unpositioned tile from a profile and its metric.
    #[must_use]
    pub fn skeleton(profile: &DemographicProfile, metric_value: f64) -> Self {
        Self {
            region_id: profile.region_id.clone(),
            abbreviation: profile.abbreviation.clone(),
            logical_column: profile.logical_column,
            logical_row: profile.logical_row,
            metric_value,
            tile_size: 0.0,
            x: 0.0,
            y: 0.0,
            non_white_ratio: profile.non_white_ratio,
            sub_category_counts: profile.sub_category_counts.clone(),
            metric_fallback: false,
        }
    }

    /// `(logical_column, logical_row)`, the key the grid engine orders by.
    #[must_use]
    pub const fn grid_cell(&self) -> (u32, u32) {
        (self.logical_column, self.logical_row)
    }

    /// Right edge in pixels.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.tile_size
    }

    /// Bottom edge in pixels.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.tile_size
    }
}
