//! Collaborator seams for the map view, chart grid, and month label strip.
//!
//! The engine talks to rendering exclusively through these traits; `mim-cmd`
//! provides terminal implementations and tests use recording doubles.

use mim_core::matrix::{CellHighlight, MatrixCell};
use mim_core::query::{FeatureEffect, FeatureFilter};
use mim_core::region::RegionId;

/// Disposable handle to an active map highlight, returned by
/// [`MapSurface::highlight`]. The engine owns at most one at a time and
/// always removes the old handle right after acquiring its replacement.
pub trait HighlightHandle {
    fn remove(self: Box<Self>);
}

/// The map view seam: layer filter, exclusion effect, region highlight.
pub trait MapSurface {
    /// Set or clear the layer's row filter (e.g. `Month = 'June'`).
    fn set_filter(&mut self, filter: Option<FeatureFilter>);
    /// Set or clear the layer's exclusion effect.
    fn set_effect(&mut self, effect: Option<FeatureEffect>);
    /// Highlight a region and hand ownership of the handle to the caller.
    fn highlight(&mut self, region: RegionId) -> Box<dyn HighlightHandle>;
}

/// The chart renderer seam. `force_full_redraw` requests a full re-layout
/// (used after reset).
pub trait GridRenderer {
    fn update_grid(
        &mut self,
        cells: &[MatrixCell],
        highlight: Option<CellHighlight>,
        force_full_redraw: bool,
    );
}

/// The month label strip seam: `Some(month)` marks exactly that label as
/// selected, `None` restores every label to visible.
pub trait MonthLabels {
    fn set_selected(&mut self, month: Option<&str>);
}
