//! Per-tile figures for tooltips and pie overlays.

use cartogram_layout_models::{CategoryShare, TileSummary};
use cartogram_region_models::RegionTile;

/// Derives the display figures for a positioned tile.
///
/// Category shares are percentages of the tile's non-white total (the sum of
/// its sub-category counts); an empty total yields 0% for every category.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn summarize(tile: &RegionTile) -> TileSummary {
    let total: u64 = tile.sub_category_counts.iter().map(|c| c.count).sum();

    let category_shares = tile
        .sub_category_counts
        .iter()
        .map(|c| CategoryShare {
            category: c.category.clone(),
            count: c.count,
            percent: if total == 0 {
                0
            } else {
                (c.count as f64 / total as f64 * 100.0).round() as u32
            },
        })
        .collect();

    let half = tile.tile_size / 2.0;

    TileSummary {
        region_id: tile.region_id.clone(),
        abbreviation: tile.abbreviation.clone(),
        metric_percent: tile.metric_value.round() as i64,
        metric_fallback: tile.metric_fallback,
        white_percent: ((1.0 - tile.non_white_ratio) * 100.0).round() as i64,
        non_white_percent: (tile.non_white_ratio * 100.0).round() as i64,
        category_shares,
        center: (tile.x + half, tile.y + half),
        label_anchor: (tile.x + half, tile.y + tile.tile_size / 10.0),
    }
}

/// Summaries for every tile, in tile order.
#[must_use]
pub fn summarize_all(tiles: &[RegionTile]) -> Vec<TileSummary> {
    tiles.iter().map(summarize).collect()
}
