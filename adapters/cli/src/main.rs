#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a dungeon run headlessly.

use anyhow::{Context, Result};
use clap::Parser;
use nrogue_cli::Args;
use tracing_subscriber::EnvFilter;

/// Entry point for the nrogue command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let summary = nrogue_cli::run(&args)?;
    if args.json {
        let encoded =
            serde_json::to_string_pretty(&summary).context("failed to encode run summary")?;
        println!("{encoded}");
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
