//! The session-scoped dashboard controller.
//!
//! One [`DashboardSession`] owns all interaction state for a map session,
//! from view startup to disposal: the spatial filter controller, the
//! cross-filter state machine, the base matrix, and the collaborator seams
//! (feature source, map surface, grid renderer, month labels). Event
//! handlers of whatever UI hosts the dashboard dispatch into the session
//! instead of capturing shared state in closures.

use crate::crossfilter::{CrossFilterStateMachine, FilterState};
use crate::selection::{SpatialFilterController, StatsRequest};
use crate::surface::{GridRenderer, MapSurface, MonthLabels};
use crate::sync::GridSyncAdapter;
use anyhow::Result;
use mim_core::matrix::{build_matrix, MatrixCell};
use mim_core::observation::{FeatureSet, Observation};
use mim_core::query::{grouped_count_query, MONTH_FIELD};
use mim_core::region::RegionHit;
use mim_core::source::FeatureSource;

/// Column index of the single rendered series.
pub const BASE_COLUMN: usize = 0;

/// Auxiliary dashboard panels whose collapse acts as an implicit
/// "done filtering" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chart,
    MonthFilter,
}

pub struct DashboardSession {
    source: Box<dyn FeatureSource>,
    map: Box<dyn MapSurface>,
    grid: GridSyncAdapter,
    labels: Box<dyn MonthLabels>,
    controller: SpatialFilterController,
    machine: CrossFilterStateMachine,
    base_cells: Vec<MatrixCell>,
    current_cells: Vec<MatrixCell>,
    chart_expanded: bool,
    months_expanded: bool,
}

impl DashboardSession {
    /// Wire a session to its collaborators. Panels start collapsed; call
    /// [`start`](Self::start) to query base statistics and render the
    /// initial grid.
    pub fn new(
        source: Box<dyn FeatureSource>,
        map: Box<dyn MapSurface>,
        renderer: Box<dyn GridRenderer>,
        labels: Box<dyn MonthLabels>,
    ) -> Self {
        Self {
            source,
            map,
            grid: GridSyncAdapter::new(renderer),
            labels,
            controller: SpatialFilterController::new(),
            machine: CrossFilterStateMachine::new(),
            base_cells: Vec::new(),
            current_cells: Vec::new(),
            chart_expanded: false,
            months_expanded: false,
        }
    }

    /// Query the unfiltered base statistics and render the initial grid.
    pub fn start(&mut self) -> Result<()> {
        let query = grouped_count_query(MONTH_FIELD, None);
        let response = self.source.query_features(&query)?;
        let observations = Observation::from_feature_set(&response, MONTH_FIELD)?;
        log::info!(
            "session: base statistics ready ({} grouped rows)",
            observations.len()
        );
        self.base_cells = build_matrix(&observations, BASE_COLUMN);
        self.current_cells = self.base_cells.clone();
        self.grid.sync(&self.current_cells, None, false);
        Ok(())
    }

    /// Route a pointer hit through the spatial filter controller.
    ///
    /// Returns the statistics request ticket when a new region was selected.
    /// The caller executes the query (see
    /// [`execute_region_stats`](Self::execute_region_stats) for the
    /// synchronous path) and hands the result back through
    /// [`complete_region_stats`](Self::complete_region_stats).
    pub fn handle_pointer(&mut self, hit: Option<RegionHit>) -> Option<StatsRequest> {
        self.controller.pointer_event(hit, self.map.as_mut())
    }

    /// Apply a completed region statistics query.
    ///
    /// A stale completion (a newer selection or a reset happened since the
    /// request was issued) is dropped unseen and `Ok(false)` returned.
    /// A fresh completion rebuilds the grid matrix, commits the region axis
    /// of the filter state, and syncs the grid.
    pub fn complete_region_stats(
        &mut self,
        request: &StatsRequest,
        response: &FeatureSet,
    ) -> Result<bool> {
        if !self.controller.is_current(request.generation) {
            log::debug!(
                "session: dropping stale statistics for region {}",
                request.selection.region_id
            );
            return Ok(false);
        }
        let observations = Observation::from_feature_set(response, MONTH_FIELD)?;
        self.current_cells = build_matrix(&observations, BASE_COLUMN);
        self.machine.select_region(request.selection.clone());
        self.grid.sync(
            &self.current_cells,
            self.machine.highlight_cell(BASE_COLUMN),
            false,
        );
        Ok(true)
    }

    /// Run the request against the feature source and complete it.
    ///
    /// On query failure the error propagates and neither the filter state
    /// nor the grid changes.
    pub fn execute_region_stats(&mut self, request: &StatsRequest) -> Result<bool> {
        let response = self.source.query_features(&request.query)?;
        self.complete_region_stats(request, &response)
    }

    /// Pointer event with immediate query execution, for synchronous
    /// callers. Returns whether the grid was updated.
    pub fn pointer_event(&mut self, hit: Option<RegionHit>) -> Result<bool> {
        match self.handle_pointer(hit) {
            Some(request) => self.execute_region_stats(&request),
            None => Ok(false),
        }
    }

    /// Select a month label: filter the map layer to that month and mark
    /// the label selected. Grid contents stay as they are; only the
    /// highlighted cell changes.
    pub fn select_month(&mut self, month: &str) {
        self.machine.select_month(month);
        self.map.set_filter(self.machine.month_filter());
        self.labels.set_selected(Some(month));
        self.grid.sync(
            &self.current_cells,
            self.machine.highlight_cell(BASE_COLUMN),
            false,
        );
    }

    /// Track panel expansion. Collapsing a previously expanded auxiliary
    /// panel resets the dashboard; expanding one changes nothing.
    pub fn set_panel_expanded(&mut self, panel: Panel, expanded: bool) {
        let flag = match panel {
            Panel::Chart => &mut self.chart_expanded,
            Panel::MonthFilter => &mut self.months_expanded,
        };
        let was_expanded = *flag;
        *flag = expanded;
        if was_expanded && !expanded {
            self.reset();
        }
    }

    /// Return the dashboard to its startup state: both filter axes cleared,
    /// highlight released, map filter and effect removed, every month label
    /// visible again, and the grid back to the full base matrix with a
    /// forced redraw. Idempotent, and reachable from any state.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.controller.reset();
        self.map.set_filter(None);
        self.map.set_effect(None);
        self.labels.set_selected(None);
        self.current_cells = self.base_cells.clone();
        self.grid.sync(&self.current_cells, None, true);
        log::info!("session: reset to base state");
    }

    pub fn filter_state(&self) -> &FilterState {
        self.machine.state()
    }

    pub fn current_cells(&self) -> &[MatrixCell] {
        &self.current_cells
    }

    pub fn base_cells(&self) -> &[MatrixCell] {
        &self.base_cells
    }
}
