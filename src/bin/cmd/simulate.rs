// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Simulate command - write synthetic round-robin writer output.

use clap::Args;

use crate::common::{AcquisitionArgs, ProgressBar, Result};
use odin_vds::io::{write_synthetic_file, SyntheticDataset};
use odin_vds::{create_interleave_vds, RoundRobinSimulation};

/// Write physical files as the writer pool would, with each pixel of
/// frame `i` set to `i * scale`.
#[derive(Args, Clone, Debug)]
pub struct SimulateCmd {
    #[command(flatten)]
    acquisition: AcquisitionArgs,

    /// Pixel value multiplier
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Also create the virtual container
    #[arg(long)]
    vds: bool,
}

impl SimulateCmd {
    pub fn run(self) -> Result<()> {
        let request = self.acquisition.request()?;
        std::fs::create_dir_all(request.path())?;

        let simulation = RoundRobinSimulation::run(
            request.frame_count(),
            request.frames_per_block(),
            request.blocks_per_file(),
            request.n_file_writers(),
        );
        let datasets: Vec<SyntheticDataset> = request
            .dataset_names()
            .iter()
            .map(|name| SyntheticDataset::new(name.as_str(), self.scale))
            .collect();

        let progress = ProgressBar::new(simulation.file_count() as u64, "Writing");
        for file in simulation.files() {
            write_synthetic_file(
                request.path(),
                request.prefix(),
                file,
                request.frame_shape(),
                request.dtype(),
                &datasets,
            )?;
            progress.inc();
        }
        progress.finish_with_message(format!("{} files", simulation.file_count()));

        println!(
            "Wrote {} source files to {}",
            simulation.file_count(),
            request.path().display()
        );

        if self.vds {
            let report = create_interleave_vds(&request)?;
            println!("Created: {}", report.output.display());
        }
        Ok(())
    }
}
