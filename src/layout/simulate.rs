// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-robin writer simulation.
//!
//! Models the file-writer pool frame by frame, without using any of the
//! planner's arithmetic: block `k` of the acquisition is handed to writer
//! `k % n_writers`, which appends it to its open file and closes that file
//! after `blocks_per_file` blocks. Each file is numbered in the order the
//! pool would open it. The result says, for every physical file, which
//! logical frames it holds and in what order.

use std::collections::BTreeMap;

/// Logical frame indices held by one simulated physical file, in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedFile {
    /// 1-based file number
    pub file_number: usize,
    /// Writer that produced the file
    pub writer: usize,
    /// Logical frame index stored at each row
    pub frames: Vec<usize>,
}

/// Output of a simulated acquisition.
#[derive(Debug, Clone, Default)]
pub struct RoundRobinSimulation {
    files: BTreeMap<usize, SimulatedFile>,
}

impl RoundRobinSimulation {
    /// Run the simulation.
    ///
    /// `frames_per_block` and `n_writers` must be non-zero.
    pub fn run(
        frame_count: usize,
        frames_per_block: usize,
        blocks_per_file: usize,
        n_writers: usize,
    ) -> Self {
        // per writer: (files opened so far, blocks in the open file)
        let mut state = vec![(0usize, 0usize); n_writers];
        let mut files: BTreeMap<usize, SimulatedFile> = BTreeMap::new();

        let mut frame = 0;
        let mut block = 0;
        while frame < frame_count {
            let writer = block % n_writers;
            let (opened, in_file) = &mut state[writer];
            if *opened == 0 || (blocks_per_file > 0 && *in_file == blocks_per_file) {
                *opened += 1;
                *in_file = 0;
            }
            *in_file += 1;

            let file_number = writer + 1 + (*opened - 1) * n_writers;
            let file = files.entry(file_number).or_insert_with(|| SimulatedFile {
                file_number,
                writer,
                frames: Vec::new(),
            });
            let end = (frame + frames_per_block).min(frame_count);
            file.frames.extend(frame..end);

            frame = end;
            block += 1;
        }

        Self { files }
    }

    /// Iterate files in ascending file number.
    pub fn files(&self) -> impl Iterator<Item = &SimulatedFile> {
        self.files.values()
    }

    /// Look up a file by number.
    pub fn file(&self, file_number: usize) -> Option<&SimulatedFile> {
        self.files.get(&file_number)
    }

    /// Number of physical files written.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Where each logical frame was written: `(file_number, row)` per index.
    pub fn locations(&self) -> Vec<(usize, usize)> {
        let total: usize = self.files.values().map(|f| f.frames.len()).sum();
        let mut out = vec![(0, 0); total];
        for file in self.files.values() {
            for (row, &frame) in file.frames.iter().enumerate() {
                out[frame] = (file.file_number, row);
            }
        }
        out
    }
}
