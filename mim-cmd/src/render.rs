//! Terminal stand-ins for the rendering collaborators.
//!
//! The dashboard's chart renderer, map surface, and month label strip are
//! trait seams; these implementations render the grid as a text table and
//! narrate map-surface mutations through the log, which is enough to watch
//! a full session run in a terminal.

use mim_core::matrix::{CellHighlight, MatrixCell};
use mim_core::months::MONTHS;
use mim_core::query::{FeatureEffect, FeatureFilter};
use mim_core::region::RegionId;
use mim_engine::surface::{GridRenderer, HighlightHandle, MapSurface, MonthLabels};

/// Longest bar drawn for a single cell.
const MAX_BAR: u64 = 40;

/// Renders the month grid as a text table on stdout.
pub struct TermGrid;

impl GridRenderer for TermGrid {
    fn update_grid(
        &mut self,
        cells: &[MatrixCell],
        highlight: Option<CellHighlight>,
        force_full_redraw: bool,
    ) {
        if force_full_redraw {
            println!("--- full redraw ---");
        }
        for cell in cells {
            let label = MONTHS.get(cell.row).copied().unwrap_or("?");
            let marker = if highlight.is_some_and(|h| h.row == cell.row && h.col == cell.col) {
                '>'
            } else {
                ' '
            };
            let bar = "#".repeat(cell.value.min(MAX_BAR) as usize);
            println!("{marker} {label:<10} {:>5} {bar}", cell.value);
        }
        println!();
    }
}

/// Narrates map-surface mutations through the log instead of drawing them.
pub struct ConsoleMap;

struct ConsoleHighlight {
    region: RegionId,
}

impl HighlightHandle for ConsoleHighlight {
    fn remove(self: Box<Self>) {
        log::info!("map: highlight removed for region {}", self.region);
    }
}

impl MapSurface for ConsoleMap {
    fn set_filter(&mut self, filter: Option<FeatureFilter>) {
        match filter.and_then(|f| f.where_clause) {
            Some(clause) => log::info!("map: layer filter {clause}"),
            None => log::info!("map: layer filter cleared"),
        }
    }

    fn set_effect(&mut self, effect: Option<FeatureEffect>) {
        match effect {
            Some(effect) => log::info!("map: excluded effect '{}'", effect.excluded_effect),
            None => log::info!("map: effect cleared"),
        }
    }

    fn highlight(&mut self, region: RegionId) -> Box<dyn HighlightHandle> {
        log::info!("map: region {region} highlighted");
        Box::new(ConsoleHighlight { region })
    }
}

/// Narrates the month label strip state.
pub struct ConsoleLabels;

impl MonthLabels for ConsoleLabels {
    fn set_selected(&mut self, month: Option<&str>) {
        match month {
            Some(month) => log::info!("labels: '{month}' selected"),
            None => log::info!("labels: all months visible"),
        }
    }
}
