// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Create command - commit the virtual container of an acquisition.

use clap::Args;

use crate::common::{AcquisitionArgs, Result};
use odin_vds::create_interleave_vds;

/// Create `{path}/{prefix}_vds.h5` for files already written.
#[derive(Args, Clone, Debug)]
pub struct CreateCmd {
    #[command(flatten)]
    acquisition: AcquisitionArgs,
}

impl CreateCmd {
    pub fn run(self) -> Result<()> {
        let request = self.acquisition.request()?;
        let report = create_interleave_vds(&request)?;

        println!("Created: {}", report.output.display());
        println!(
            "Datasets: {} | Frames: {} | Source files: {} | Mappings per dataset: {}",
            report.dataset_count,
            request.frame_count(),
            report.file_count,
            report.mappings_per_dataset
        );
        Ok(())
    }
}
