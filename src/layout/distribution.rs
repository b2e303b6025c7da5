// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame distribution planning.
//!
//! Given the acquisition geometry, works out how many frames each round-robin
//! writer produced and how those frames are split across the writer's
//! successive physical files.
//!
//! Blocks are dealt out cyclically: global block `k` goes to writer
//! `k % n_writers`. Each writer appends its blocks to its current file and
//! rolls over to a new file once `blocks_per_file` blocks have been written.
//! Files are numbered round-robin, so all writers' first files come before
//! any second file.

use std::collections::BTreeMap;

use serde::Serialize;

/// Frames held by one physical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FileFrames {
    /// Number of frames in the file
    pub frames: usize,
    /// Frames per block used by the writer
    pub frames_per_block: usize,
    /// Logical frame index where the file's first block lands
    pub start: usize,
}

impl FileFrames {
    /// Create a new file record.
    pub fn new(frames: usize, frames_per_block: usize, start: usize) -> Self {
        Self {
            frames,
            frames_per_block,
            start,
        }
    }

    /// Number of complete blocks in the file.
    pub fn blocks(&self) -> usize {
        self.frames / self.frames_per_block
    }

    /// Frames of a trailing partial block, if any.
    pub fn remainder_frames(&self) -> usize {
        self.frames % self.frames_per_block
    }

    /// Frames covered by complete blocks.
    pub fn full_block_frames(&self) -> usize {
        self.blocks() * self.frames_per_block
    }
}

/// Files of an acquisition keyed by 1-based file number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrameDistribution {
    files: BTreeMap<usize, FileFrames>,
}

impl FrameDistribution {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file record.
    pub fn insert(&mut self, file_number: usize, file: FileFrames) {
        self.files.insert(file_number, file);
    }

    /// Look up a file by number.
    pub fn get(&self, file_number: usize) -> Option<&FileFrames> {
        self.files.get(&file_number)
    }

    /// Iterate files in ascending file number.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FileFrames)> {
        self.files.iter().map(|(&n, f)| (n, f))
    }

    /// File numbers in ascending order.
    pub fn file_numbers(&self) -> impl Iterator<Item = usize> + '_ {
        self.files.keys().copied()
    }

    /// Number of physical files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no files are planned.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of frames over all files.
    pub fn total_frames(&self) -> usize {
        self.files.values().map(|f| f.frames).sum()
    }
}

impl<'a> IntoIterator for &'a FrameDistribution {
    type Item = (&'a usize, &'a FileFrames);
    type IntoIter = std::collections::btree_map::Iter<'a, usize, FileFrames>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Total frames written by each writer, indexed by writer.
///
/// `frames_per_block` and `n_writers` must be non-zero.
pub fn frames_per_writer(
    frame_count: usize,
    frames_per_block: usize,
    n_writers: usize,
) -> Vec<usize> {
    let n_blocks = frame_count.div_ceil(frames_per_block);
    let min_blocks = n_blocks / n_writers;
    let remainder = n_blocks % n_writers;

    let mut frames: Vec<usize> = (0..n_writers)
        .map(|w| (min_blocks + usize::from(w < remainder)) * frames_per_block)
        .collect();

    // The globally last block may be partial; its owner gives the excess back.
    let overflow = n_blocks * frames_per_block - frame_count;
    if n_blocks > 0 {
        frames[(n_blocks - 1) % n_writers] -= overflow;
    }
    frames
}

/// Split every writer's frames into physical files.
///
/// `blocks_per_file == 0` means a writer never rolls over. `frame_count`,
/// `frames_per_block` and `n_writers` must be non-zero.
pub fn frame_distribution(
    frame_count: usize,
    frames_per_block: usize,
    blocks_per_file: usize,
    n_writers: usize,
) -> FrameDistribution {
    let max_frames_per_file = if blocks_per_file > 0 {
        frames_per_block * blocks_per_file
    } else {
        frame_count
    };
    // frames written across all writers before each one rolls to a new file
    let frames_before_new_file = n_writers * max_frames_per_file;

    let mut distribution = FrameDistribution::new();
    for (writer, n_frames) in frames_per_writer(frame_count, frames_per_block, n_writers)
        .into_iter()
        .enumerate()
    {
        let n_files = n_frames.div_ceil(max_frames_per_file);
        for i in 0..n_files {
            distribution.insert(
                writer + 1 + i * n_writers,
                FileFrames::new(
                    max_frames_per_file.min(n_frames - i * max_frames_per_file),
                    frames_per_block,
                    frames_per_block * writer + i * frames_before_new_file,
                ),
            );
        }
    }
    distribution
}
