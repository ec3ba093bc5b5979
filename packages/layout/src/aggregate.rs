//! Date filtering and per-region averaging of raw records.

use std::collections::HashMap;

use cartogram_region_models::{DateRange, RegionAggregate, RegionRecord};

/// Returns the records inside `range`, or every record when there is no
/// range or the range matches nothing.
///
/// An empty cartogram is never drawn, so an empty selection falls back to
/// the complete dataset.
#[must_use]
pub fn select_records<'a>(
    records: &'a [RegionRecord],
    range: Option<&DateRange>,
) -> Vec<&'a RegionRecord> {
    let Some(range) = range else {
        return records.iter().collect();
    };

    let selected: Vec<&RegionRecord> = records.iter().filter(|r| range.contains(r.date)).collect();

    if selected.is_empty() {
        log::warn!(
            "No records fall within {range}; falling back to all {} records",
            records.len()
        );
        return records.iter().collect();
    }

    log::debug!(
        "Selected {}/{} records within {range}",
        selected.len(),
        records.len()
    );
    selected
}

/// Averages `metric_value` per region.
///
/// Groups keep the order in which each region first appears in `records`.
#[must_use]
pub fn average_by_region<'a>(
    records: impl IntoIterator<Item = &'a RegionRecord>,
) -> Vec<RegionAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64, u32)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.region_id.as_str()).or_insert_with(|| {
            sums.push((record.region_id.as_str(), 0.0, 0));
            sums.len() - 1
        });
        let (_, sum, count) = &mut sums[slot];
        *sum += record.metric_value;
        *count += 1;
    }

    sums.into_iter()
        .map(|(region_id, sum, count)| RegionAggregate {
            region_id: region_id.to_string(),
            metric_value: sum / f64::from(count),
        })
        .collect()
}

/// Filters `records` by `range` (with the empty-selection fallback) and
/// averages the result per region.
#[must_use]
pub fn aggregate(records: &[RegionRecord], range: Option<&DateRange>) -> Vec<RegionAggregate> {
    average_by_region(select_records(records, range))
}
