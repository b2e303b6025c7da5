// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # odin-vds CLI
//!
//! Command-line tool for interleaved virtual dataset assembly.
//!
//! ## Usage
//!
//! ```sh
//! # Show how 105 frames are spread over 4 writers
//! odin-vds plan --frames 105 --frames-per-block 10 --blocks-per-file 3
//!
//! # Create the virtual container for a finished acquisition
//! odin-vds create --config acquisition.toml
//!
//! # Write synthetic writer output and its virtual container
//! odin-vds simulate --path /tmp/acq --prefix test --frames 19 \
//!     --frames-per-block 2 --blocks-per-file 2 --shape 2x2 --vds
//! ```

mod cmd;
mod common;

use std::process;

use clap::{ArgAction, Parser, Subcommand};
use cmd::{CreateCmd, PlanCmd, SimulateCmd};
use common::Result;

/// odin-vds - Interleaved HDF5 virtual datasets
///
/// Stitch the files of round-robin parallel file writers into one
/// contiguous virtual dataset per acquisition.
#[derive(Parser, Clone)]
#[command(name = "odin-vds")]
#[command(about = "Interleaved HDF5 virtual datasets for round-robin file writers", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Show the frame distribution across writers and files
    Plan(PlanCmd),

    /// Create the virtual container for written files
    Create(CreateCmd),

    /// Write synthetic round-robin source files
    Simulate(SimulateCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    match cli.command {
        Commands::Plan(cmd) => cmd.run(),
        Commands::Create(cmd) => cmd.run(),
        Commands::Simulate(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
