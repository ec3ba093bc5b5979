//! Key-based join of region aggregates with demographic profiles.
//!
//! Every profile must find exactly one aggregate and every aggregated
//! region must have exactly one profile; anything else is a
//! [`DataAlignmentError`] and stops the layout.

use std::collections::{BTreeMap, BTreeSet};

use cartogram_region_models::{DemographicProfile, RegionAggregate, RegionTile};

use crate::DataAlignmentError;

/// Builds one unsized tile per profile, in profile order.
///
/// `selected` holds the aggregates for the active filter; `full` holds the
/// aggregates over the whole dataset. A region missing from `selected` (no
/// records inside the range while other regions have some) takes its
/// all-time mean from `full` so the tile count never changes with the
/// filter; such tiles have `metric_fallback` set.
///
/// # Errors
///
/// * [`DataAlignmentError::DuplicateProfile`] if two profiles share an id.
/// * [`DataAlignmentError::MissingProfile`] if a region in `full` has no
///   profile.
/// * [`DataAlignmentError::MissingRecords`] if a profile's region appears
///   in neither aggregate set.
pub fn join_profiles(
    selected: &[RegionAggregate],
    full: &[RegionAggregate],
    profiles: &[DemographicProfile],
) -> Result<Vec<RegionTile>, DataAlignmentError> {
    let mut profile_ids = BTreeSet::new();
    for profile in profiles {
        if !profile_ids.insert(profile.region_id.as_str()) {
            return Err(DataAlignmentError::DuplicateProfile {
                region_id: profile.region_id.clone(),
            });
        }
    }

    if let Some(orphan) = full
        .iter()
        .chain(selected)
        .find(|a| !profile_ids.contains(a.region_id.as_str()))
    {
        return Err(DataAlignmentError::MissingProfile {
            region_id: orphan.region_id.clone(),
        });
    }

    let selected = index_metrics(selected);
    let full = index_metrics(full);

    profiles
        .iter()
        .map(|profile| -> Result<RegionTile, DataAlignmentError> {
            let id = profile.region_id.as_str();
            let (metric, metric_fallback) = match selected.get(id) {
                Some(metric) => (*metric, false),
                None => {
                    let metric = full.get(id).copied().ok_or_else(|| {
                        DataAlignmentError::MissingRecords {
                            region_id: profile.region_id.clone(),
                        }
                    })?;
                    log::debug!("No records for '{id}' in the selected range; using all-time mean");
                    (metric, true)
                }
            };
            Ok(RegionTile {
                metric_fallback,
                ..RegionTile::skeleton(profile, metric)
            })
        })
        .collect()
}

fn index_metrics(aggregates: &[RegionAggregate]) -> BTreeMap<&str, f64> {
    aggregates
        .iter()
        .map(|a| (a.region_id.as_str(), a.metric_value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::profile;

    fn agg(region_id: &str, metric_value: f64) -> RegionAggregate {
        RegionAggregate {
            region_id: region_id.to_string(),
            metric_value,
        }
    }

    #[test]
    fn joins_by_key_in_profile_order() {
        // Aggregates in a different order than the profiles.
        let aggregates = vec![agg("Ohio", 5.0), agg("Texas", 50.0)];
        let profiles = vec![profile("Texas", 0, 0), profile("Ohio", 1, 0)];

        let tiles = join_profiles(&aggregates, &aggregates, &profiles).unwrap();
        assert_eq!(tiles[0].region_id, "Texas");
        assert!((tiles[0].metric_value - 50.0).abs() < f64::EPSILON);
        assert_eq!(tiles[1].region_id, "Ohio");
        assert!((tiles[1].metric_value - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn region_outside_range_uses_full_mean() {
        let selected = vec![agg("Texas", 50.0)];
        let full = vec![agg("Texas", 40.0), agg("Ohio", 7.0)];
        let profiles = vec![profile("Texas", 0, 0), profile("Ohio", 1, 0)];

        let tiles = join_profiles(&selected, &full, &profiles).unwrap();
        assert_eq!(tiles.len(), 2);
        assert!((tiles[0].metric_value - 50.0).abs() < f64::EPSILON);
        assert!((tiles[1].metric_value - 7.0).abs() < f64::EPSILON);
        assert!(!tiles[0].metric_fallback);
        assert!(tiles[1].metric_fallback);
    }

    #[test]
    fn unfiltered_join_marks_no_fallbacks() {
        let aggregates = vec![agg("Texas", 50.0), agg("Ohio", 7.0)];
        let profiles = vec![profile("Texas", 0, 0), profile("Ohio", 1, 0)];

        let tiles = join_profiles(&aggregates, &aggregates, &profiles).unwrap();
        assert!(tiles.iter().all(|t| !t.metric_fallback));
    }

    #[test]
    fn profile_without_records_is_an_error() {
        let aggregates = vec![agg("Texas", 50.0)];
        let profiles = vec![profile("Texas", 0, 0), profile("Ohio", 1, 0)];

        assert_eq!(
            join_profiles(&aggregates, &aggregates, &profiles),
            Err(DataAlignmentError::MissingRecords {
                region_id: "Ohio".to_string()
            })
        );
    }

    #[test]
    fn records_without_profile_are_an_error() {
        let aggregates = vec![agg("Texas", 50.0), agg("Guam", 1.0)];
        let profiles = vec![profile("Texas", 0, 0)];

        assert_eq!(
            join_profiles(&aggregates, &aggregates, &profiles),
            Err(DataAlignmentError::MissingProfile {
                region_id: "Guam".to_string()
            })
        );
    }

    #[test]
    fn duplicate_profiles_are_an_error() {
        let aggregates = vec![agg("Texas", 50.0)];
        let profiles = vec![profile("Texas", 0, 0), profile("Texas", 0, 1)];

        assert!(matches!(
            join_profiles(&aggregates, &aggregates, &profiles),
            Err(DataAlignmentError::DuplicateProfile { .. })
        ));
    }
}
