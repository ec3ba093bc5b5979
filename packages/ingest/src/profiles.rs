//! Demographic profile loading.
//!
//! The on-disk format is a JSON array; each entry carries the grid cell as
//! `x`/`y` and the non-white breakdown as `pieData`:
//!
//! ```json
//! [{ "State": "Texas", "abbr": "TX", "x": 4, "y": 6,
//!    "proportionNonWhite": 0.6,
//!    "pieData": [{ "race": "Asian", "value": 1500000 }] }]
//! ```

use std::path::Path;

use cartogram_region_models::states::abbr_for_name;
use cartogram_region_models::{CategoryCount, DemographicProfile};
use serde::Deserialize;

use crate::IngestError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRow {
    #[serde(alias = "State", alias = "regionId")]
    state: String,
    #[serde(default, alias = "abbreviation")]
    abbr: Option<String>,
    #[serde(alias = "logicalColumn")]
    x: u32,
    #[serde(alias = "logicalRow")]
    y: u32,
    #[serde(alias = "nonWhiteRatio")]
    proportion_non_white: f64,
    #[serde(default)]
    pie_data: Vec<PieSlice>,
}

#[derive(Debug, Deserialize)]
struct PieSlice {
    #[serde(alias = "category")]
    race: String,
    #[serde(alias = "count")]
    value: u64,
}

impl ProfileRow {
    fn into_profile(self, row: usize) -> Result<DemographicProfile, IngestError> {
        let invalid = |message: String| IngestError::InvalidRow {
            what: "profile",
            row,
            message,
        };

        if !(0.0..=1.0).contains(&self.proportion_non_white) {
            return Err(invalid(format!(
                "proportionNonWhite {} is outside 0..=1",
                self.proportion_non_white
            )));
        }

        let abbreviation = match self.abbr {
            Some(abbr) if !abbr.trim().is_empty() => abbr.trim().to_string(),
            _ => abbr_for_name(&self.state)
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("no abbreviation for '{}'", self.state)))?,
        };

        Ok(DemographicProfile {
            region_id: self.state,
            abbreviation,
            logical_column: self.x,
            logical_row: self.y,
            non_white_ratio: self.proportion_non_white,
            sub_category_counts: self
                .pie_data
                .into_iter()
                .map(|slice| CategoryCount {
                    category: slice.race,
                    count: slice.value,
                })
                .collect(),
        })
    }
}

/// Parses profiles from a JSON document, keeping their order.
///
/// A missing `abbr` is filled in from the state name.
///
/// # Errors
///
/// Returns [`IngestError::Json`] for malformed JSON and
/// [`IngestError::InvalidRow`] for an out-of-range ratio or an unknown
/// state without an abbreviation.
pub fn parse_profiles(json: &str) -> Result<Vec<DemographicProfile>, IngestError> {
    let rows: Vec<ProfileRow> = serde_json::from_str(json)?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.into_profile(i + 1))
        .collect()
}

/// Loads profiles from a JSON file.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or parsed.
pub fn load_profiles(path: &Path) -> Result<Vec<DemographicProfile>, IngestError> {
    let profiles = parse_profiles(&crate::read_file(path)?)?;
    log::info!("Loaded {} profiles from {}", profiles.len(), path.display());
    Ok(profiles)
}

/// Sorts profiles into the ascending `(column, row)` order the grid engine
/// requires.
pub fn sort_by_grid(profiles: &mut [DemographicProfile]) {
    profiles.sort_by_key(|p| (p.logical_column, p.logical_row));
}
