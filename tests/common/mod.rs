// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::Path;

use hdf5::plist::dataset_create::VirtualMapping;
use hdf5::types::H5Type;
use odin_vds::io::{write_synthetic_sources, SyntheticDataset};
use odin_vds::{AcquisitionLayoutRequest, Dtype, RoundRobinSimulation};

// ============================================================================
// Requests
// ============================================================================

/// Geometry of a test acquisition.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub frame_count: usize,
    pub frames_per_block: usize,
    pub blocks_per_file: usize,
    pub n_file_writers: usize,
    pub frame_shape: (usize, usize),
}

impl Geometry {
    /// Four writers, blocks of 2 frames, 2 blocks per file, 19 frames of 2x2.
    pub fn nineteen_frames() -> Self {
        Self {
            frame_count: 19,
            frames_per_block: 2,
            blocks_per_file: 2,
            n_file_writers: 4,
            frame_shape: (2, 2),
        }
    }

    /// Request for this geometry in `dir`.
    pub fn request(
        &self,
        dir: &Path,
        prefix: &str,
        datasets: &[&str],
        dtype: Dtype,
    ) -> AcquisitionLayoutRequest {
        AcquisitionLayoutRequest::builder()
            .path(dir)
            .prefix(prefix)
            .dataset_names(datasets.iter().copied())
            .frame_count(self.frame_count)
            .frames_per_block(self.frames_per_block)
            .blocks_per_file(self.blocks_per_file)
            .n_file_writers(self.n_file_writers)
            .frame_shape(self.frame_shape.0, self.frame_shape.1)
            .dtype(dtype)
            .build()
            .expect("test geometry is valid")
    }

    /// Simulated writer output for this geometry.
    pub fn simulate(&self) -> RoundRobinSimulation {
        RoundRobinSimulation::run(
            self.frame_count,
            self.frames_per_block,
            self.blocks_per_file,
            self.n_file_writers,
        )
    }
}

// ============================================================================
// Files
// ============================================================================

/// Write the simulated physical files for `request`, one dataset per scale.
pub fn write_sources(request: &AcquisitionLayoutRequest, scales: &[f64]) -> usize {
    let simulation = RoundRobinSimulation::run(
        request.frame_count(),
        request.frames_per_block(),
        request.blocks_per_file(),
        request.n_file_writers(),
    );
    let datasets: Vec<SyntheticDataset> = request
        .dataset_names()
        .iter()
        .zip(scales)
        .map(|(name, &scale)| SyntheticDataset::new(name.as_str(), scale))
        .collect();
    write_synthetic_sources(
        request.path(),
        request.prefix(),
        simulation.files(),
        request.frame_shape(),
        request.dtype(),
        &datasets,
    )
    .expect("synthetic sources written")
}

/// Read a whole dataset as a flat vector.
pub fn read_dataset<T: H5Type>(path: &Path, name: &str) -> (Vec<usize>, Vec<T>) {
    let file = hdf5::File::open(path).expect("open container");
    let dataset = file.dataset(name).expect("dataset exists");
    let shape = dataset.shape();
    let data = dataset.read_raw::<T>().expect("read dataset");
    (shape, data)
}

/// Virtual source mappings stored for a dataset of `path`.
pub fn read_virtual_map(path: &Path, name: &str) -> Vec<VirtualMapping> {
    let file = hdf5::File::open(path).expect("open container");
    let dataset = file.dataset(name).expect("dataset exists");
    dataset.dcpl().expect("dataset creation properties").virtual_map()
}

/// Flat pixel values of frames `0..frame_count`, each pixel `index * scale`.
pub fn expected_pixels(frame_count: usize, frame_shape: (usize, usize), scale: f64) -> Vec<f64> {
    let pixels = frame_shape.0 * frame_shape.1;
    (0..frame_count)
        .flat_map(|i| std::iter::repeat(i as f64 * scale).take(pixels))
        .collect()
}
