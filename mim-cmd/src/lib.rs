//! Command implementations for the Monthly Incident Map CLI.
//!
//! Provides subcommands for inspecting incident fixtures and for driving a
//! full dashboard session from a scripted event file.

use clap::Subcommand;

pub mod render;
pub mod simulate;
pub mod stats;

#[derive(Subcommand)]
pub enum Command {
    /// Print the unfiltered month-by-count grid for an incident fixture
    Stats {
        /// Path to incidents CSV (incident_id,region_id,date,x,y)
        #[arg(short = 'i', long)]
        incidents_csv: String,
    },

    /// List the regions in a region fixture
    Regions {
        /// Path to regions CSV (ID,NAME,XMIN,YMIN,XMAX,YMAX,RING)
        #[arg(short = 'r', long)]
        regions_csv: String,
    },

    /// Drive an interactive dashboard session from an event script
    Simulate {
        /// Path to incidents CSV (incident_id,region_id,date,x,y)
        #[arg(short = 'i', long)]
        incidents_csv: String,

        /// Path to regions CSV (ID,NAME,XMIN,YMIN,XMAX,YMAX,RING)
        #[arg(short = 'r', long)]
        regions_csv: String,

        /// Path to the event script (click X Y | month NAME |
        /// expand/collapse chart|months | reset)
        #[arg(short = 's', long)]
        script: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Stats { incidents_csv } => stats::run_stats(&incidents_csv).await,
        Command::Regions { regions_csv } => stats::run_regions(&regions_csv).await,
        Command::Simulate {
            incidents_csv,
            regions_csv,
            script,
        } => simulate::run_simulate(&incidents_csv, &regions_csv, &script).await,
    }
}
