// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Virtual layout construction.
//!
//! A [`VirtualLayout`] is the in-memory description of one virtual dataset:
//! a list of [`SourceMapping`]s, each taking a run of rows from one physical
//! file and placing them in the logical `(frame_count, H, W)` array. Nothing
//! here touches the filesystem; committing a layout is done by
//! [`crate::io::container`].
//!
//! Complete blocks of a file are placed with a [`BlockStride`] of stride
//! `n_writers * frames_per_block`, which undoes the round-robin interleave.
//! A trailing partial block can only exist in the file holding the last
//! block of the acquisition, so its rows go to the logical tail.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{Dtype, Result, VdsError};
use crate::io::naming::physical_file_path;
use crate::request::AcquisitionLayoutRequest;

use super::block::BlockStride;
use super::distribution::FrameDistribution;

/// Where a mapping's rows land in the logical frame axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetRegion {
    /// Round-robin interleaved complete blocks
    Strided(BlockStride),
    /// Contiguous run of frames at the end of the acquisition
    Tail(Range<usize>),
}

impl TargetRegion {
    /// Number of logical frames covered.
    pub fn len(&self) -> usize {
        match self {
            TargetRegion::Strided(pattern) => pattern.len(),
            TargetRegion::Tail(range) => range.len(),
        }
    }

    /// True when no frames are covered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical frame indices covered, in source row order.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            TargetRegion::Strided(pattern) => pattern.indices().collect(),
            TargetRegion::Tail(range) => range.clone().collect(),
        }
    }
}

/// One run of source rows mapped into the virtual dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceMapping {
    /// 1-based physical file number
    pub file_number: usize,
    /// Physical file path
    pub source_file: PathBuf,
    /// Frames the physical dataset holds
    pub source_frames: usize,
    /// Contiguous rows of the physical dataset being mapped
    pub source_rows: Range<usize>,
    /// Destination in the logical frame axis
    pub target: TargetRegion,
}

/// Complete mapping of one virtual dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualLayout {
    /// Dataset name, used both in the sources and in the container
    pub dataset: String,
    /// Logical frame count
    pub frame_count: usize,
    /// `(H, W)` of each frame
    pub frame_shape: (usize, usize),
    /// Element type
    pub dtype: Dtype,
    /// Mappings in file order, full blocks before remainders
    pub mappings: Vec<SourceMapping>,
}

impl VirtualLayout {
    /// Logical shape of the dataset.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.frame_count, self.frame_shape.0, self.frame_shape.1)
    }

    /// Distinct physical files referenced by the layout.
    pub fn source_files(&self) -> BTreeSet<&Path> {
        self.mappings
            .iter()
            .map(|m| m.source_file.as_path())
            .collect()
    }

    /// Check that the mappings cover `0..frame_count` exactly once.
    ///
    /// Works per mapping and per block run, never per frame. Fails if rows
    /// and targets disagree, a mapping reaches past either end, two mappings
    /// share a frame or frames are left unmapped.
    pub fn check(&self) -> Result<()> {
        let mut covered = 0usize;
        let mut tails = 0usize;
        let mut regions = Vec::with_capacity(self.mappings.len());
        for mapping in &self.mappings {
            check_rows(mapping)?;
            let pattern = match &mapping.target {
                TargetRegion::Strided(pattern) => {
                    if !pattern.is_disjoint() {
                        return Err(VdsError::invariant_violation(format!(
                            "file {} blocks overlap each other",
                            mapping.file_number
                        )));
                    }
                    *pattern
                }
                TargetRegion::Tail(range) => {
                    tails += 1;
                    if range.end != self.frame_count {
                        return Err(VdsError::invariant_violation(format!(
                            "file {} tail {range:?} does not end at frame {}",
                            mapping.file_number, self.frame_count
                        )));
                    }
                    BlockStride::contiguous(range.clone())
                }
            };
            if pattern.end() > self.frame_count {
                return Err(VdsError::invariant_violation(format!(
                    "file {} maps frame {} beyond {} frames",
                    mapping.file_number,
                    pattern.end() - 1,
                    self.frame_count
                )));
            }
            covered = covered.saturating_add(pattern.len());
            regions.push((mapping.file_number, pattern));
        }
        if tails > 1 {
            return Err(VdsError::invariant_violation(format!(
                "{tails} tail mappings, at most one allowed"
            )));
        }

        for (i, (file, pattern)) in regions.iter().enumerate() {
            for (other_file, other) in &regions[i + 1..] {
                if pattern.overlaps(other) {
                    return Err(VdsError::invariant_violation(format!(
                        "frames mapped by files {file} and {other_file} overlap"
                    )));
                }
            }
        }
        if covered != self.frame_count {
            return Err(VdsError::invariant_violation(format!(
                "mappings cover {covered} of {} frames",
                self.frame_count
            )));
        }
        Ok(())
    }

    /// Resolve every logical frame to `(file_number, row)`.
    ///
    /// Allocates one slot per frame; [`VirtualLayout::check`] verifies the
    /// same coverage without that cost. Fails if a frame is mapped twice,
    /// mapped out of bounds, or left unmapped.
    pub fn resolve(&self) -> Result<Vec<(usize, usize)>> {
        let mut resolved: Vec<Option<(usize, usize)>> = vec![None; self.frame_count];
        for mapping in &self.mappings {
            check_rows(mapping)?;
            for (row, frame) in mapping
                .source_rows
                .clone()
                .zip(mapping.target.indices())
            {
                let slot = resolved.get_mut(frame).ok_or_else(|| {
                    VdsError::invariant_violation(format!(
                        "file {} maps frame {frame} beyond {} frames",
                        mapping.file_number, self.frame_count
                    ))
                })?;
                if let Some((other, _)) = slot {
                    return Err(VdsError::invariant_violation(format!(
                        "frame {frame} mapped by files {other} and {}",
                        mapping.file_number
                    )));
                }
                *slot = Some((mapping.file_number, row));
            }
        }

        resolved
            .into_iter()
            .enumerate()
            .map(|(frame, slot)| {
                slot.ok_or_else(|| {
                    VdsError::invariant_violation(format!("frame {frame} is not mapped"))
                })
            })
            .collect()
    }
}

fn check_rows(mapping: &SourceMapping) -> Result<()> {
    if mapping.source_rows.len() != mapping.target.len() {
        return Err(VdsError::invariant_violation(format!(
            "file {} maps {} rows onto {} frames",
            mapping.file_number,
            mapping.source_rows.len(),
            mapping.target.len()
        )));
    }
    if mapping.source_rows.end > mapping.source_frames {
        return Err(VdsError::invariant_violation(format!(
            "file {} rows {:?} exceed its {} frames",
            mapping.file_number, mapping.source_rows, mapping.source_frames
        )));
    }
    Ok(())
}

/// Build the virtual layout of one dataset from a frame distribution.
pub fn build_layout(
    request: &AcquisitionLayoutRequest,
    distribution: &FrameDistribution,
    dataset: &str,
) -> VirtualLayout {
    let frame_count = request.frame_count();
    let frames_per_block = request.frames_per_block();
    let stride = request.n_file_writers() * frames_per_block;

    let mut mappings = Vec::with_capacity(distribution.len() + 1);
    for (file_number, file) in distribution.iter() {
        let source_file = physical_file_path(request.path(), request.prefix(), file_number);
        let full_block_frames = file.full_block_frames();

        if file.blocks() > 0 {
            let pattern = BlockStride::new(file.start, stride, file.blocks(), frames_per_block);
            debug!(
                dataset,
                file_number,
                start = pattern.start,
                count = pattern.count,
                "mapping full blocks"
            );
            mappings.push(SourceMapping {
                file_number,
                source_file: source_file.clone(),
                source_frames: file.frames,
                source_rows: 0..full_block_frames,
                target: TargetRegion::Strided(pattern),
            });
        }

        let remainder = file.remainder_frames();
        if remainder > 0 {
            debug!(dataset, file_number, remainder, "mapping trailing frames");
            mappings.push(SourceMapping {
                file_number,
                source_file,
                source_frames: file.frames,
                source_rows: full_block_frames..file.frames,
                target: TargetRegion::Tail(frame_count - remainder..frame_count),
            });
        }
    }

    VirtualLayout {
        dataset: dataset.to_string(),
        frame_count,
        frame_shape: request.frame_shape(),
        dtype: request.dtype(),
        mappings,
    }
}
