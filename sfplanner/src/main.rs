// sfplanner/src/main.rs
//! SFPlanner entry point.

use anyhow::Result;
use clap::Parser;

use sfplanner::cli::Cli;
use sfplanner::logger;

fn main() -> Result<()> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(logger::level_for_flags(cli.quiet, cli.debug));

    sfplanner::run(cli)
}
