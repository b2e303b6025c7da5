// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Interleaved virtual dataset assembly.
//!
//! Plans the frame distribution once, builds a layout per dataset name and
//! commits them all into `{path}/{prefix}_vds.h5`. Every layout is built and
//! checked in memory before the container is created, so a failure leaves
//! no partial output behind from this call.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::{Dtype, Result, VdsError};
use crate::io::container::commit_layouts;
use crate::io::naming::vds_file_path;
use crate::layout::{build_layout, frame_distribution, FrameDistribution, VirtualLayout};
use crate::request::AcquisitionLayoutRequest;

/// Summary of a committed virtual container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Path of the virtual container
    pub output: PathBuf,
    /// Physical files referenced
    pub file_count: usize,
    /// Virtual datasets written
    pub dataset_count: usize,
    /// Source mappings per dataset
    pub mappings_per_dataset: usize,
}

/// Plan the distribution and build every dataset's layout without writing.
pub fn plan_layouts(
    request: &AcquisitionLayoutRequest,
) -> Result<(FrameDistribution, Vec<VirtualLayout>)> {
    let distribution = frame_distribution(
        request.frame_count(),
        request.frames_per_block(),
        request.blocks_per_file(),
        request.n_file_writers(),
    );

    let total = distribution.total_frames();
    if total != request.frame_count() {
        return Err(VdsError::invariant_violation(format!(
            "distribution holds {total} frames, expected {}",
            request.frame_count()
        )));
    }
    if distribution.len() < request.n_file_writers() {
        warn!(
            files = distribution.len(),
            writers = request.n_file_writers(),
            "some file writers receive no frames"
        );
    }

    let layouts: Vec<VirtualLayout> = request
        .dataset_names()
        .iter()
        .map(|name| build_layout(request, &distribution, name))
        .collect();

    // identical for every dataset, so one check covers all
    if let Some(first) = layouts.first() {
        first.check()?;
    }
    Ok((distribution, layouts))
}

/// Build and commit the interleaved virtual container for `request`.
///
/// Physical files are neither read nor checked; a missing or short file
/// only shows up when a reader resolves the virtual dataset.
pub fn create_interleave_vds(request: &AcquisitionLayoutRequest) -> Result<AssemblyReport> {
    let (distribution, layouts) = plan_layouts(request)?;
    let output = vds_file_path(request.path(), request.prefix());

    commit_layouts(&output, &layouts)?;

    let report = AssemblyReport {
        output,
        file_count: distribution.len(),
        dataset_count: layouts.len(),
        mappings_per_dataset: layouts.first().map_or(0, |l| l.mappings.len()),
    };
    info!(
        output = %report.output.display(),
        frames = request.frame_count(),
        files = report.file_count,
        datasets = report.dataset_count,
        "interleaved VDS created"
    );
    Ok(report)
}

/// Positional form of [`create_interleave_vds`].
///
/// Validates the arguments exactly like
/// [`AcquisitionLayoutRequestBuilder::build`](crate::request::AcquisitionLayoutRequestBuilder::build)
/// before touching the filesystem.
#[allow(clippy::too_many_arguments)]
pub fn create_interleave_vds_with<P, S>(
    path: P,
    prefix: &str,
    dataset_names: &[S],
    frame_count: usize,
    frames_per_block: usize,
    blocks_per_file: usize,
    frame_shape: (usize, usize),
    dtype: Dtype,
    n_file_writers: usize,
) -> Result<AssemblyReport>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let request = AcquisitionLayoutRequest::builder()
        .path(path)
        .prefix(prefix)
        .dataset_names(dataset_names.iter().map(|s| s.as_ref().to_string()))
        .frame_count(frame_count)
        .frames_per_block(frames_per_block)
        .blocks_per_file(blocks_per_file)
        .frame_shape(frame_shape.0, frame_shape.1)
        .dtype(dtype)
        .n_file_writers(n_file_writers)
        .build()?;
    create_interleave_vds(&request)
}
