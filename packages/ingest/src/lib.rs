#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loads cartogram inputs from disk.
//!
//! * Time-series records come from CSV (`State,date,proportionAffected`).
//! * Demographic profiles come from a JSON array with grid cells and the
//!   per-category breakdown.
//! * Layout constants come from an optional TOML file.
//!
//! Everything is converted into the types in [`cartogram_region_models`]
//! and [`cartogram_layout_models`] before the layout engine sees it.

pub mod config;
pub mod parsing;
pub mod profiles;
pub mod records;

use thiserror::Error;

/// Errors that can occur while loading inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    /// I/O error (file read).
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File being read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Layout constants failed validation.
    #[error("{0}")]
    Config(#[from] cartogram_layout_models::InvalidConfigError),

    /// A row parsed but holds an unusable value.
    #[error("Invalid {what} at row {row}: {message}")]
    InvalidRow {
        /// Which input the row came from.
        what: &'static str,
        /// 1-based data row number (header excluded).
        row: usize,
        /// Description of what went wrong.
        message: String,
    },
}

pub(crate) fn read_file(path: &std::path::Path) -> Result<String, IngestError> {
    std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })
}
