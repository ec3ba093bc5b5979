//! End-to-end layout run.

use cartogram_layout_models::LayoutConfig;
use cartogram_region_models::{DateRange, DemographicProfile, RegionRecord, RegionTile};

use crate::LayoutError;
use crate::aggregate::aggregate;
use crate::centering::center_columns;
use crate::grid::place_tiles;
use crate::join::join_profiles;
use crate::size::SizeScale;

/// Computes positioned tiles from scratch.
///
/// `profiles` must be ordered ascending by `(logical_column, logical_row)`;
/// the returned tiles follow that order. Nothing is cached between calls, so
/// identical inputs always produce identical coordinates.
///
/// # Errors
///
/// * [`LayoutError::Config`] if `config` fails validation.
/// * [`LayoutError::DataAlignment`] if records and profiles cannot be
///   joined 1:1.
/// * [`LayoutError::Precondition`] if the profiles are not in grid order.
pub fn layout(
    records: &[RegionRecord],
    profiles: &[DemographicProfile],
    range: Option<&DateRange>,
    config: &LayoutConfig,
) -> Result<Vec<RegionTile>, LayoutError> {
    config.validate()?;

    let full = aggregate(records, None);
    let selected = match range {
        Some(_) => aggregate(records, range),
        None => full.clone(),
    };

    let tiles = join_profiles(&selected, &full, profiles)?;
    let tiles = SizeScale::from_config(config).apply(tiles);
    let tiles = place_tiles(tiles, config)?;
    let tiles = center_columns(tiles);

    log::info!(
        "Laid out {} tiles from {} records ({})",
        tiles.len(),
        records.len(),
        range.map_or_else(|| "all dates".to_string(), ToString::to_string)
    );

    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centering::column_widths;
    use crate::test_support::{date, profile, record};
    use crate::{DataAlignmentError, LayoutPreconditionError};

    /// Three columns; column 1 has a gap between rows 1 and 3.
    fn profiles() -> Vec<DemographicProfile> {
        vec![
            profile("Alaska", 0, 0),
            profile("Washington", 0, 1),
            profile("Oregon", 0, 2),
            profile("Idaho", 1, 1),
            profile("Nevada", 1, 3),
            profile("Utah", 1, 4),
            profile("Montana", 2, 1),
        ]
    }

    fn records() -> Vec<RegionRecord> {
        let mut records = Vec::new();
        for (i, p) in profiles().iter().enumerate() {
            let base = f64::from(u32::try_from(i).unwrap()) * 13.0;
            records.push(record(&p.region_id, "2020-01-15", base));
            records.push(record(&p.region_id, "2020-06-15", 100.0 - base));
        }
        records
    }

    #[test]
    fn stacked_column_scenario() {
        let profiles = vec![profile("A", 0, 0), profile("B", 0, 1)];
        let records = vec![record("A", "2020-01-01", 0.0), record("B", "2020-01-01", 100.0)];

        let tiles = layout(&records, &profiles, None, &LayoutConfig::default()).unwrap();
        assert!(tiles[0].y.abs() < f64::EPSILON);
        assert!((tiles[1].y - 70.0).abs() < f64::EPSILON);
        assert!((tiles[0].tile_size - 70.0).abs() < f64::EPSILON);
        assert!((tiles[1].tile_size - 150.0).abs() < f64::EPSILON);
        // Raw x is shared at 350; the narrower tile is then centered.
        assert!((tiles[1].x - 350.0).abs() < f64::EPSILON);
        assert!((tiles[0].x - 390.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wide_column_scenario() {
        let profiles = vec![profile("A", 0, 0), profile("B", 1, 0), profile("C", 1, 1)];
        let records = vec![
            record("A", "2020-01-01", 100.0),
            record("B", "2020-01-01", 0.0),
            record("C", "2020-01-01", 0.0),
        ];

        let tiles = layout(&records, &profiles, None, &LayoutConfig::default()).unwrap();
        assert!((tiles[1].x - (tiles[0].x + 150.0)).abs() < f64::EPSILON);
        assert!((tiles[2].x - tiles[1].x).abs() < f64::EPSILON);
    }

    #[test]
    fn range_with_no_records_keeps_every_region() {
        let range = DateRange::new(date("1999-01-01"), date("1999-12-31"));
        let filtered = layout(&records(), &profiles(), Some(&range), &LayoutConfig::default());
        let unfiltered = layout(&records(), &profiles(), None, &LayoutConfig::default());

        let filtered = filtered.unwrap();
        assert_eq!(filtered.len(), profiles().len());
        assert_eq!(filtered, unfiltered.unwrap());
    }

    fn january() -> DateRange {
        DateRange::new(date("2020-01-01"), date("2020-01-31"))
    }

    #[test]
    fn region_missing_from_range_is_marked() {
        let mut records = records();
        records.retain(|r| !(r.region_id == "Utah" && r.date == date("2020-01-15")));

        let tiles = layout(&records, &profiles(), Some(&january()), &LayoutConfig::default()).unwrap();
        let utah = tiles.iter().find(|t| t.region_id == "Utah").unwrap();
        assert!(utah.metric_fallback);
        assert!((utah.metric_value - 35.0).abs() < f64::EPSILON);
        assert_eq!(tiles.iter().filter(|t| t.metric_fallback).count(), 1);
    }

    #[test]
    fn filter_changes_sizes_only_through_the_mean() {
        let tiles = layout(&records(), &profiles(), Some(&january()), &LayoutConfig::default()).unwrap();
        // Only the January record counts: Alaska's mean is 0, Washington's 13.
        assert!(tiles[0].metric_value.abs() < f64::EPSILON);
        assert!((tiles[1].metric_value - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let config = LayoutConfig::default();
        let a = layout(&records(), &profiles(), None, &config).unwrap();
        let b = layout(&records(), &profiles(), None, &config).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.x.to_bits(), y.x.to_bits());
            assert_eq!(x.y.to_bits(), y.y.to_bits());
            assert_eq!(x.tile_size.to_bits(), y.tile_size.to_bits());
        }
    }

    #[test]
    fn columns_do_not_overlap_and_rows_stack() {
        let tiles = layout(&records(), &profiles(), Some(&january()), &LayoutConfig::default()).unwrap();

        for a in &tiles {
            for b in &tiles {
                if a.logical_column < b.logical_column {
                    assert!(a.right() <= b.x + 1e-9, "{} overlaps {}", a.region_id, b.region_id);
                }
                if a.logical_column == b.logical_column && a.logical_row + 1 == b.logical_row {
                    assert!(a.bottom() <= b.y + 1e-9, "{} overlaps {}", a.region_id, b.region_id);
                }
            }
        }
    }

    #[test]
    fn centering_stays_within_column() {
        let tiles = layout(&records(), &profiles(), Some(&january()), &LayoutConfig::default()).unwrap();
        let widths = column_widths(&tiles);

        for column in widths.keys() {
            let in_column: Vec<_> = tiles.iter().filter(|t| t.logical_column == *column).collect();
            let raw_x = in_column
                .iter()
                .map(|t| t.x)
                .fold(f64::INFINITY, f64::min);
            for tile in in_column {
                let slack = widths[column] - tile.tile_size;
                assert!(tile.x >= raw_x);
                assert!(tile.x <= raw_x + slack + 1e-9);
            }
        }
    }

    #[test]
    fn misaligned_profiles_halt_layout() {
        let mut profiles = profiles();
        profiles.pop();
        let err = layout(&records(), &profiles, None, &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::DataAlignment(DataAlignmentError::MissingProfile {
                region_id: "Montana".to_string()
            })
        );
    }

    #[test]
    fn unordered_profiles_halt_layout() {
        let mut profiles = profiles();
        profiles.swap(0, 3);
        let err = layout(&records(), &profiles, None, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Precondition(LayoutPreconditionError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn invalid_config_halts_layout() {
        let config = LayoutConfig {
            num_color_bins: 0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            layout(&records(), &profiles(), None, &config),
            Err(LayoutError::Config(_))
        ));
    }
}
