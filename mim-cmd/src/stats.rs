//! Base statistics and region listing commands.

use crate::render::TermGrid;
use log::info;
use mim_core::matrix::build_matrix;
use mim_core::observation::Observation;
use mim_core::query::{grouped_count_query, MONTH_FIELD};
use mim_core::source::FeatureSource;
use mim_db::Database;
use mim_engine::session::BASE_COLUMN;
use mim_engine::surface::GridRenderer;

pub(crate) fn read_fixture(path: &str) -> anyhow::Result<String> {
    if !std::path::Path::new(path).exists() {
        anyhow::bail!("fixture {path} not found");
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Print the unfiltered month-by-count grid for an incident fixture.
pub async fn run_stats(incidents_csv: &str) -> anyhow::Result<()> {
    let incidents = read_fixture(incidents_csv)?;
    let db = Database::new()?;
    db.load_incidents(&incidents)?;

    let query = grouped_count_query(MONTH_FIELD, None);
    let response = db.query_features(&query)?;
    let observations = Observation::from_feature_set(&response, MONTH_FIELD)?;
    info!(
        "computed base statistics: {} grouped rows from {}",
        observations.len(),
        incidents_csv
    );

    let cells = build_matrix(&observations, BASE_COLUMN);
    TermGrid.update_grid(&cells, None, false);
    Ok(())
}

/// List the regions in a region fixture.
pub async fn run_regions(regions_csv: &str) -> anyhow::Result<()> {
    let regions = read_fixture(regions_csv)?;
    let db = Database::new()?;
    db.load_regions(&regions)?;

    for region in db.query_regions()? {
        println!("{:>4}  {}", region.region_id, region.name);
    }
    Ok(())
}
