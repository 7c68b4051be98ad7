use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod fetch;
mod model;
mod order;
mod output;
mod render;
mod schema;
mod sheet;
mod workflow;

use cli::{Args, MenuConfig};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let json = args.json;
    let config = MenuConfig::from(args);
    let report = workflow::generate_menu(&config)?;

    if json {
        let text = serde_json::to_string_pretty(&report).context("serialize run summary")?;
        println!("{text}");
    } else {
        println!("Wine menu generated: {}", report.path.display());
    }
    Ok(())
}

/// Logs go to stderr so stdout carries only the result.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
