//! Grid layout engine.
//!
//! Turns `(logical_column, logical_row)` cells plus per-tile sizes into pixel
//! origins. Tiles must arrive strictly ascending by `(column, row)`.
//!
//! Two independent folds run over that order:
//!
//! * [`ColumnCursor`] tracks the current column's origin and widest tile.
//!   A new column starts at the previous origin plus the previous column's
//!   width, so columns never overlap horizontally.
//! * [`RowCursor`] tracks where the next tile in a column would start. Tiles
//!   in consecutive rows stack directly below one another using their real
//!   sizes; a new column or a gap in the rows re-anchors at
//!   `row * column_spacing_pitch`.

use cartogram_layout_models::LayoutConfig;
use cartogram_region_models::RegionTile;

use crate::LayoutPreconditionError;

/// Column fold state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnCursor {
    column: Option<u32>,
    origin: f64,
    max_size: f64,
}

impl ColumnCursor {
    /// Cursor positioned so the first column starts at `starting_offset`.
    #[must_use]
    pub const fn new(starting_offset: f64) -> Self {
        Self {
            column: None,
            origin: starting_offset,
            max_size: 0.0,
        }
    }

    /// Consumes one tile and returns the next state with the tile's raw `x`.
    #[must_use]
    pub fn step(self, column: u32, tile_size: f64) -> (Self, f64) {
        if self.column == Some(column) {
            let next = Self {
                max_size: self.max_size.max(tile_size),
                ..self
            };
            return (next, self.origin);
        }

        let origin = if self.column.is_some() {
            self.origin + self.max_size
        } else {
            self.origin
        };
        let next = Self {
            column: Some(column),
            origin,
            max_size: tile_size,
        };
        (next, origin)
    }

    /// Width of the current column so far.
    #[must_use]
    pub const fn max_size(&self) -> f64 {
        self.max_size
    }
}

/// Row fold state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowCursor {
    column: Option<u32>,
    row: Option<u32>,
    next_y: f64,
    pitch: f64,
}

impl RowCursor {
    #[must_use]
    pub const fn new(pitch: f64) -> Self {
        Self {
            column: None,
            row: None,
            next_y: 0.0,
            pitch,
        }
    }

    /// Consumes one tile and returns the next state with the tile's `y`.
    #[must_use]
    pub fn step(self, column: u32, row: u32, tile_size: f64) -> (Self, f64) {
        let contiguous =
            self.column == Some(column) && self.row.and_then(|r| r.checked_add(1)) == Some(row);

        let y = if contiguous {
            self.next_y
        } else {
            f64::from(row) * self.pitch
        };

        let next = Self {
            column: Some(column),
            row: Some(row),
            next_y: y + tile_size,
            pitch: self.pitch,
        };
        (next, y)
    }
}

/// Checks that tiles are strictly ascending by `(column, row)`.
///
/// # Errors
///
/// Returns [`LayoutPreconditionError::OutOfOrder`] for the first pair that
/// is out of order or occupies the same cell.
pub fn validate_order(tiles: &[RegionTile]) -> Result<(), LayoutPreconditionError> {
    match tiles
        .windows(2)
        .find(|pair| pair[0].grid_cell() >= pair[1].grid_cell())
    {
        Some([previous, tile]) => Err(LayoutPreconditionError::OutOfOrder {
            previous_region_id: previous.region_id.clone(),
            previous_cell: previous.grid_cell(),
            region_id: tile.region_id.clone(),
            cell: tile.grid_cell(),
        }),
        _ => Ok(()),
    }
}

/// Assigns raw `x` and `y` to every tile.
///
/// The returned `x` is the column origin; [`crate::centering`] shifts
/// narrower tiles afterwards.
///
/// # Errors
///
/// Returns [`LayoutPreconditionError`] if the tiles are not in grid order.
pub fn place_tiles(
    tiles: Vec<RegionTile>,
    config: &LayoutConfig,
) -> Result<Vec<RegionTile>, LayoutPreconditionError> {
    validate_order(&tiles)?;

    let cursors = (
        ColumnCursor::new(config.starting_column_offset),
        RowCursor::new(config.column_spacing_pitch),
    );

    Ok(tiles
        .into_iter()
        .scan(cursors, |(columns, rows), tile| {
            let (next_columns, x) = columns.step(tile.logical_column, tile.tile_size);
            let (next_rows, y) = rows.step(tile.logical_column, tile.logical_row, tile.tile_size);
            *columns = next_columns;
            *rows = next_rows;

            log::trace!(
                "Placed '{}' at cell {:?}: x={x} y={y} size={}",
                tile.region_id,
                tile.grid_cell(),
                tile.tile_size
            );
            Some(RegionTile { x, y, ..tile })
        })
        .collect())
}
