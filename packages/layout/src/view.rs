//! Stateful cartogram that re-lays itself out on filter changes.

use cartogram_layout_models::{FilterSignal, LayoutConfig};
use cartogram_region_models::{DateRange, DemographicProfile, RegionRecord, RegionTile};

use crate::LayoutError;
use crate::pipeline::layout;

/// Owns the cartogram inputs and the most recent layout.
///
/// Every accepted [`FilterSignal`] re-runs the whole pipeline and replaces
/// the previous tiles; the last signal handled wins.
#[derive(Debug, Clone)]
pub struct CartogramView {
    records: Vec<RegionRecord>,
    profiles: Vec<DemographicProfile>,
    config: LayoutConfig,
    selected: Option<DateRange>,
    suppressed: bool,
    tiles: Vec<RegionTile>,
}

impl CartogramView {
    /// Builds the view and computes the unfiltered layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the initial layout fails.
    pub fn new(
        records: Vec<RegionRecord>,
        profiles: Vec<DemographicProfile>,
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        let tiles = layout(&records, &profiles, None, &config)?;
        Ok(Self {
            records,
            profiles,
            config,
            selected: None,
            suppressed: false,
            tiles,
        })
    }

    /// Applies a filter signal.
    ///
    /// Returns `Ok(false)` without touching the layout while the view is
    /// suppressed. On error the previous tiles and selection are kept.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the new layout fails.
    pub fn handle(&mut self, signal: FilterSignal) -> Result<bool, LayoutError> {
        if self.suppressed {
            log::debug!("Ignoring {signal:?} while suppressed");
            return Ok(false);
        }

        let range = signal.range();
        self.tiles = layout(&self.records, &self.profiles, range.as_ref(), &self.config)?;
        self.selected = range;
        Ok(true)
    }

    /// Stops (or resumes) reacting to filter signals, e.g. while another
    /// view of the same data is on screen. Signals missed while suppressed
    /// are not replayed.
    pub const fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Tiles from the most recent successful layout.
    #[must_use]
    pub fn tiles(&self) -> &[RegionTile] {
        &self.tiles
    }

    /// Date range behind [`Self::tiles`], `None` when unfiltered.
    #[must_use]
    pub const fn selected_range(&self) -> Option<&DateRange> {
        self.selected.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }
}
