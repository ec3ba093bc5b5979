#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tile layout engine for a fixed-grid cartogram.
//!
//! Each region has a fixed logical `(column, row)` cell; its tile size comes
//! from the mean of its time-series metric over the selected date range. The
//! pipeline runs strictly in this order, each stage a pure transformation of
//! the region list:
//!
//! 1. [`aggregate`] filters and averages the raw records per region.
//! 2. [`join`] pairs each aggregate with its demographic profile by key.
//! 3. [`size`] maps the metric onto a clamped linear pixel scale.
//! 4. [`grid`] folds over the ordered tiles to assign `x` and `y`.
//! 5. [`centering`] centers narrower tiles within their column.
//!
//! [`pipeline::layout`] runs all five; [`view::CartogramView`] re-runs it on
//! every filter change.

pub mod aggregate;
pub mod centering;
pub mod grid;
pub mod join;
pub mod legend;
pub mod pipeline;
pub mod size;
pub mod summary;
pub mod view;

#[cfg(test)]
mod test_support;

pub use pipeline::layout;
pub use view::CartogramView;

use cartogram_layout_models::InvalidConfigError;
use thiserror::Error;

/// The time-series aggregates and the demographic profiles do not describe
/// the same set of regions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataAlignmentError {
    /// Records exist for a region that has no demographic profile.
    #[error("No demographic profile for region '{region_id}'")]
    MissingProfile {
        /// Region present in the records only.
        region_id: String,
    },

    /// A demographic profile has no records at all.
    #[error("No time-series records for region '{region_id}'")]
    MissingRecords {
        /// Region present in the profiles only.
        region_id: String,
    },

    /// Two demographic profiles share a region identifier.
    #[error("Duplicate demographic profile for region '{region_id}'")]
    DuplicateProfile {
        /// The repeated identifier.
        region_id: String,
    },
}

/// Tiles reached the grid engine in an order it cannot lay out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutPreconditionError {
    /// Tiles are not strictly ascending by `(column, row)`.
    #[error(
        "Tiles out of grid order: '{region_id}' at {cell:?} follows '{previous_region_id}' at {previous_cell:?}"
    )]
    OutOfOrder {
        /// Region that comes first in the input.
        previous_region_id: String,
        /// Its `(column, row)`.
        previous_cell: (u32, u32),
        /// Region that should have come earlier.
        region_id: String,
        /// Its `(column, row)`.
        cell: (u32, u32),
    },
}

/// Errors that halt a layout run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Records and profiles could not be joined 1:1.
    #[error("Data alignment error: {0}")]
    DataAlignment(#[from] DataAlignmentError),

    /// Grid ordering precondition violated.
    #[error("Layout precondition error: {0}")]
    Precondition(#[from] LayoutPreconditionError),

    /// Layout constants are unusable.
    #[error("Config error: {0}")]
    Config(#[from] InvalidConfigError),
}
