//! Builders shared by the unit tests of this crate.

use cartogram_region_models::{CategoryCount, DemographicProfile, RegionRecord, RegionTile};
use chrono::NaiveDate;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn record(region_id: &str, day: &str, metric_value: f64) -> RegionRecord {
    RegionRecord {
        region_id: region_id.to_string(),
        date: date(day),
        metric_value,
    }
}

pub fn profile(region_id: &str, column: u32, row: u32) -> DemographicProfile {
    DemographicProfile {
        region_id: region_id.to_string(),
        abbreviation: region_id.chars().take(2).collect::<String>().to_uppercase(),
        logical_column: column,
        logical_row: row,
        non_white_ratio: 0.4,
        sub_category_counts: vec![
            CategoryCount {
                category: "Black/African American".to_string(),
                count: 300,
            },
            CategoryCount {
                category: "Asian".to_string(),
                count: 100,
            },
        ],
    }
}

/// A sized but unpositioned tile.
pub fn sized(region_id: &str, column: u32, row: u32, tile_size: f64) -> RegionTile {
    RegionTile {
        tile_size,
        ..RegionTile::skeleton(&profile(region_id, column, row), 0.0)
    }
}
