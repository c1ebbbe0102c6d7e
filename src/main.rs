//! algoviz CLI - step-by-step algorithm visualizer
//!
//! Command-line interface for replaying sorting and pathfinding runs.

use std::process::ExitCode;

use algoviz::cli::{run_cli, Args};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("ALGOVIZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run_cli(Args::parse())
}
