use crate::surface::GridRenderer;
use mim_core::matrix::{CellHighlight, MatrixCell};

/// Boundary adapter pushing matrix and highlight state to the external
/// chart renderer. Pure forwarding; no business logic lives here.
pub struct GridSyncAdapter {
    renderer: Box<dyn GridRenderer>,
}

impl GridSyncAdapter {
    pub fn new(renderer: Box<dyn GridRenderer>) -> Self {
        Self { renderer }
    }

    /// Push the matrix and the currently highlighted cell (if any) to the
    /// renderer. `force_full_redraw` requests a full re-layout, used when
    /// the dashboard returns to its base state.
    pub fn sync(
        &mut self,
        cells: &[MatrixCell],
        highlight: Option<CellHighlight>,
        force_full_redraw: bool,
    ) {
        self.renderer.update_grid(cells, highlight, force_full_redraw);
    }
}
