//! caravan - TestRail reporting bridge for BDD test runs
//!
//! Resolves which cases belong to a section subtree, creates runs with a
//! fixed case set, submits aggregated results and manages milestones.

use caravan::{cli, commands::Commands, common::logging};
use clap::Parser;

#[derive(Parser)]
#[command(name = "caravan", about = "TestRail reporting bridge for BDD test runs")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
