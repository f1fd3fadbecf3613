//! MIM CLI - Command line tool for exploring monthly incident map data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "mim-cli",
    version,
    about = "Monthly Incident Map data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: mim_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    mim_cmd::run(cli.command).await
}
