// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Plan command - show how frames spread over writers and files.

use clap::Args;
use serde::Serialize;

use crate::common::{AcquisitionArgs, Result};
use odin_vds::io::physical_file_name;
use odin_vds::{frame_distribution, frames_per_writer, AcquisitionLayoutRequest};

/// Show the frame distribution without touching any file.
#[derive(Args, Clone, Debug)]
pub struct PlanCmd {
    #[command(flatten)]
    acquisition: AcquisitionArgs,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PlanSummary {
    frame_count: usize,
    frames_per_block: usize,
    blocks_per_file: usize,
    n_file_writers: usize,
    frames_per_writer: Vec<usize>,
    files: Vec<PlannedFile>,
}

#[derive(Serialize)]
struct PlannedFile {
    file_number: usize,
    file_name: String,
    frames: usize,
    blocks: usize,
    remainder_frames: usize,
    start: usize,
}

impl PlanCmd {
    pub fn run(self) -> Result<()> {
        let mut args = self.acquisition;
        // the plan does not depend on naming or frame geometry
        if args.config.is_none() {
            args.prefix.get_or_insert_with(|| "acquisition".to_string());
            args.shape.get_or_insert((1, 1));
        }
        let request = args.request()?;
        let summary = summarize(&request);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_table(&summary);
        }
        Ok(())
    }
}

fn summarize(request: &AcquisitionLayoutRequest) -> PlanSummary {
    let distribution = frame_distribution(
        request.frame_count(),
        request.frames_per_block(),
        request.blocks_per_file(),
        request.n_file_writers(),
    );
    let files = distribution
        .iter()
        .map(|(file_number, file)| PlannedFile {
            file_number,
            file_name: physical_file_name(request.prefix(), file_number),
            frames: file.frames,
            blocks: file.blocks(),
            remainder_frames: file.remainder_frames(),
            start: file.start,
        })
        .collect();

    PlanSummary {
        frame_count: request.frame_count(),
        frames_per_block: request.frames_per_block(),
        blocks_per_file: request.blocks_per_file(),
        n_file_writers: request.n_file_writers(),
        frames_per_writer: frames_per_writer(
            request.frame_count(),
            request.frames_per_block(),
            request.n_file_writers(),
        ),
        files,
    }
}

fn print_table(summary: &PlanSummary) {
    let per_file = if summary.blocks_per_file == 0 {
        "unlimited".to_string()
    } else {
        summary.blocks_per_file.to_string()
    };
    println!(
        "Frames: {} | Block: {} | Blocks/file: {} | Writers: {}",
        summary.frame_count, summary.frames_per_block, per_file, summary.n_file_writers
    );
    println!();
    println!("Frames per writer:");
    for (writer, frames) in summary.frames_per_writer.iter().enumerate() {
        println!("  [{}] {} frames", writer, frames);
    }
    println!();
    println!(
        "{:<20} {:>10} {:>8} {:>10} {:>10}",
        "File", "Frames", "Blocks", "Remainder", "Start"
    );
    for file in &summary.files {
        println!(
            "{:<20} {:>10} {:>8} {:>10} {:>10}",
            file.file_name, file.frames, file.blocks, file.remainder_frames, file.start
        );
    }
    println!();
    println!("Files: {}", summary.files.len());
}
