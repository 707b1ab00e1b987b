//! ## hello-cli
//! **Host for the hello module**
//!
//! Plays the role of the module loader: reads the configured count, calls
//! `activate` once at start and `deactivate` once at stop.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run_command(cli)
}
