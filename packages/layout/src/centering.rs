//! Horizontal centering of narrower tiles within their column.

use std::collections::BTreeMap;

use cartogram_region_models::RegionTile;

/// Widest tile size per logical column.
#[must_use]
pub fn column_widths(tiles: &[RegionTile]) -> BTreeMap<u32, f64> {
    let mut widths = BTreeMap::new();
    for tile in tiles {
        widths
            .entry(tile.logical_column)
            .and_modify(|w: &mut f64| *w = w.max(tile.tile_size))
            .or_insert(tile.tile_size);
    }
    widths
}

/// Shifts each tile right by half the difference between its column's
/// widest tile and its own size.
///
/// Must run exactly once, on the raw `x` produced by
/// [`crate::grid::place_tiles`]. `y` and column membership are untouched.
#[must_use]
pub fn center_columns(tiles: Vec<RegionTile>) -> Vec<RegionTile> {
    let widths = column_widths(&tiles);

    tiles
        .into_iter()
        .map(|tile| {
            let width = widths
                .get(&tile.logical_column)
                .copied()
                .unwrap_or(tile.tile_size);
            if tile.tile_size < width {
                RegionTile {
                    x: tile.x + (width - tile.tile_size) / 2.0,
                    ..tile
                }
            } else {
                tile
            }
        })
        .collect()
}
