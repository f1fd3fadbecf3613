//! The month/region cross-filter state machine.

use crate::selection::SpatialSelection;
use mim_core::matrix::CellHighlight;
use mim_core::months::month_index;
use mim_core::query::FeatureFilter;

/// The single source of truth for what is currently filtered or highlighted.
///
/// The two axes are independent and may both be active at once: the month
/// axis drives the map layer's row filter, the region axis drives the
/// statistics scope and the map's exclusion effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub active_month: Option<String>,
    pub active_region: Option<SpatialSelection>,
}

/// Pure transition operations over [`FilterState`], callable from any event
/// source: pointer events, month label clicks, panel collapse, the reset
/// control. The machine knows nothing about any UI toolkit.
#[derive(Debug, Default)]
pub struct CrossFilterStateMachine {
    state: FilterState,
}

impl CrossFilterStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Select a month. Leaves the region axis alone and triggers no
    /// statistics re-query; the grid keeps showing the current matrix.
    pub fn select_month(&mut self, month: &str) {
        self.state.active_month = Some(month.to_string());
    }

    /// Commit a region selection. Called once a spatially scoped statistics
    /// query has completed fresh.
    pub fn select_region(&mut self, selection: SpatialSelection) {
        self.state.active_region = Some(selection);
    }

    /// Clear both axes. Idempotent.
    pub fn reset(&mut self) {
        self.state = FilterState::default();
    }

    /// Map layer filter derived from the month axis.
    pub fn month_filter(&self) -> Option<FeatureFilter> {
        self.state
            .active_month
            .as_deref()
            .map(FeatureFilter::month_equals)
    }

    /// Grid cell to emphasize for the month axis, if a canonical month is
    /// selected.
    pub fn highlight_cell(&self, col: usize) -> Option<CellHighlight> {
        self.state
            .active_month
            .as_deref()
            .and_then(month_index)
            .map(|row| CellHighlight { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mim_core::geometry::{BoundingBox, Geometry};

    fn selection(region_id: i64) -> SpatialSelection {
        SpatialSelection {
            region_id,
            geometry: Geometry::Bbox(BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
        }
    }

    #[test]
    fn test_initial_state_is_unfiltered() {
        let machine = CrossFilterStateMachine::new();
        assert_eq!(machine.state(), &FilterState::default());
        assert!(machine.month_filter().is_none());
        assert!(machine.highlight_cell(0).is_none());
    }

    #[test]
    fn test_axes_are_orthogonal() {
        let mut machine = CrossFilterStateMachine::new();
        machine.select_month("June");
        machine.select_region(selection(3));

        let state = machine.state();
        assert_eq!(state.active_month.as_deref(), Some("June"));
        assert_eq!(state.active_region.as_ref().unwrap().region_id, 3);

        // selecting a different region keeps the month axis
        machine.select_region(selection(4));
        assert_eq!(machine.state().active_month.as_deref(), Some("June"));
    }

    #[test]
    fn test_month_filter_clause() {
        let mut machine = CrossFilterStateMachine::new();
        machine.select_month("June");
        let filter = machine.month_filter().unwrap();
        assert_eq!(filter.where_clause.as_deref(), Some("Month = 'June'"));
    }

    #[test]
    fn test_highlight_cell_row() {
        let mut machine = CrossFilterStateMachine::new();
        machine.select_month("June");
        assert_eq!(
            machine.highlight_cell(0),
            Some(CellHighlight { row: 5, col: 0 })
        );
        machine.select_month("Floreal");
        assert!(machine.highlight_cell(0).is_none());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut machine = CrossFilterStateMachine::new();
        machine.select_month("March");
        machine.select_region(selection(1));

        machine.reset();
        let once = machine.state().clone();
        machine.reset();
        assert_eq!(machine.state(), &once);
        assert_eq!(once, FilterState::default());
    }
}
