// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! HDF5 container output.
//!
//! Commits [`VirtualLayout`]s as virtual datasets and, for tests and
//! demonstrations, writes synthetic physical files shaped like the output of
//! the file-writer pool.
//!
//! Virtual datasets only record where the frames live. Source files are
//! resolved lazily by the reader, so a container may be committed before or
//! after its sources exist.

use std::path::Path;

use hdf5::types::H5Type;
use hdf5::{File, Hyperslab, Selection, SliceOrIndex};
use ndarray::Array3;
use tracing::{debug, info};

use crate::core::{Dtype, Result, VdsError};
use crate::layout::{SimulatedFile, SourceMapping, TargetRegion, VirtualLayout};

use super::naming::physical_file_path;

/// Create (or truncate) `output` and commit every layout as a virtual dataset.
///
/// Object time tracking is disabled for the root group and every dataset so
/// identical layouts produce identical metadata.
pub fn commit_layouts(output: &Path, layouts: &[VirtualLayout]) -> Result<()> {
    let file = File::with_options()
        .with_fapl(|fapl| fapl.libver_latest())
        .with_fcpl(|fcpl| fcpl.obj_track_times(false))
        .create(output)
        .map_err(|e| {
            VdsError::hdf5(format!("creating {}", output.display()), e.to_string())
        })?;

    for layout in layouts {
        match layout.dtype {
            Dtype::UInt8 => create_virtual_dataset::<u8>(&file, layout)?,
            Dtype::UInt16 => create_virtual_dataset::<u16>(&file, layout)?,
            Dtype::UInt32 => create_virtual_dataset::<u32>(&file, layout)?,
            Dtype::UInt64 => create_virtual_dataset::<u64>(&file, layout)?,
            Dtype::Int8 => create_virtual_dataset::<i8>(&file, layout)?,
            Dtype::Int16 => create_virtual_dataset::<i16>(&file, layout)?,
            Dtype::Int32 => create_virtual_dataset::<i32>(&file, layout)?,
            Dtype::Int64 => create_virtual_dataset::<i64>(&file, layout)?,
            Dtype::Float32 => create_virtual_dataset::<f32>(&file, layout)?,
            Dtype::Float64 => create_virtual_dataset::<f64>(&file, layout)?,
        }
    }

    file.flush()
        .map_err(|e| VdsError::hdf5(format!("flushing {}", output.display()), e.to_string()))?;
    info!(
        output = %output.display(),
        datasets = layouts.len(),
        "virtual container committed"
    );
    Ok(())
}

fn create_virtual_dataset<T: H5Type>(file: &File, layout: &VirtualLayout) -> Result<()> {
    let (frames, height, width) = layout.shape();

    file.new_dataset::<T>()
        .shape((frames, height, width))
        .with_dcpl(|dcpl| {
            dcpl.obj_track_times(false);
            for mapping in &layout.mappings {
                dcpl.virtual_map(
                    mapping.source_file.to_string_lossy(),
                    layout.dataset.as_str(),
                    (mapping.source_frames, height, width),
                    source_selection(mapping, height, width),
                    (frames, height, width),
                    target_selection(&mapping.target, height, width),
                );
            }
            dcpl
        })
        .create(layout.dataset.as_str())
        .map_err(|e| {
            VdsError::hdf5(
                format!("creating virtual dataset '{}'", layout.dataset),
                e.to_string(),
            )
        })?;

    debug!(
        dataset = %layout.dataset,
        mappings = layout.mappings.len(),
        "virtual dataset created"
    );
    Ok(())
}

/// Hyperslab over whole frames, selecting along the frame axis only.
fn frame_selection(frames: SliceOrIndex, height: usize, width: usize) -> Selection {
    let whole = |count| SliceOrIndex::SliceCount {
        start: 0,
        step: 1,
        count,
        block: 1,
    };
    Selection::Hyperslab(Hyperslab::from(vec![frames, whole(height), whole(width)]))
}

fn source_selection(mapping: &SourceMapping, height: usize, width: usize) -> Selection {
    let rows = &mapping.source_rows;
    frame_selection(
        SliceOrIndex::SliceCount {
            start: rows.start,
            step: 1,
            count: rows.len(),
            block: 1,
        },
        height,
        width,
    )
}

fn target_selection(target: &TargetRegion, height: usize, width: usize) -> Selection {
    let frames = match target {
        TargetRegion::Strided(pattern) => SliceOrIndex::SliceCount {
            start: pattern.start,
            step: pattern.stride,
            count: pattern.count,
            block: pattern.block,
        },
        TargetRegion::Tail(range) => SliceOrIndex::SliceCount {
            start: range.start,
            step: 1,
            count: range.len(),
            block: 1,
        },
    };
    frame_selection(frames, height, width)
}

/// A dataset written into synthetic source files.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDataset {
    /// Dataset name
    pub name: String,
    /// Every pixel of frame `i` holds `i * scale`
    pub scale: f64,
}

impl SyntheticDataset {
    /// Dataset whose pixels equal the frame index times `scale`.
    pub fn new(name: impl Into<String>, scale: f64) -> Self {
        Self {
            name: name.into(),
            scale,
        }
    }
}

/// Element types that synthetic frames can be written as.
trait SyntheticValue: H5Type + Copy {
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_synthetic_value {
    ($($ty:ty),*) => {
        $(impl SyntheticValue for $ty {
            fn from_f64(value: f64) -> Self {
                value as $ty
            }
        })*
    };
}

impl_synthetic_value!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

/// Write one simulated physical file into `dir`.
pub fn write_synthetic_file(
    dir: &Path,
    prefix: &str,
    file: &SimulatedFile,
    frame_shape: (usize, usize),
    dtype: Dtype,
    datasets: &[SyntheticDataset],
) -> Result<()> {
    let path = physical_file_path(dir, prefix, file.file_number);
    let h5 = File::create(&path)
        .map_err(|e| VdsError::hdf5(format!("creating {}", path.display()), e.to_string()))?;

    for dataset in datasets {
        match dtype {
            Dtype::UInt8 => write_frames::<u8>(&h5, file, frame_shape, dataset)?,
            Dtype::UInt16 => write_frames::<u16>(&h5, file, frame_shape, dataset)?,
            Dtype::UInt32 => write_frames::<u32>(&h5, file, frame_shape, dataset)?,
            Dtype::UInt64 => write_frames::<u64>(&h5, file, frame_shape, dataset)?,
            Dtype::Int8 => write_frames::<i8>(&h5, file, frame_shape, dataset)?,
            Dtype::Int16 => write_frames::<i16>(&h5, file, frame_shape, dataset)?,
            Dtype::Int32 => write_frames::<i32>(&h5, file, frame_shape, dataset)?,
            Dtype::Int64 => write_frames::<i64>(&h5, file, frame_shape, dataset)?,
            Dtype::Float32 => write_frames::<f32>(&h5, file, frame_shape, dataset)?,
            Dtype::Float64 => write_frames::<f64>(&h5, file, frame_shape, dataset)?,
        }
    }

    debug!(
        path = %path.display(),
        frames = file.frames.len(),
        "synthetic source written"
    );
    Ok(())
}

/// Write every simulated physical file into `dir`.
pub fn write_synthetic_sources<'a, I>(
    dir: &Path,
    prefix: &str,
    files: I,
    frame_shape: (usize, usize),
    dtype: Dtype,
    datasets: &[SyntheticDataset],
) -> Result<usize>
where
    I: IntoIterator<Item = &'a SimulatedFile>,
{
    let mut written = 0;
    for file in files {
        write_synthetic_file(dir, prefix, file, frame_shape, dtype, datasets)?;
        written += 1;
    }
    Ok(written)
}

fn write_frames<T: SyntheticValue>(
    h5: &File,
    file: &SimulatedFile,
    (height, width): (usize, usize),
    dataset: &SyntheticDataset,
) -> Result<()> {
    let data = Array3::from_shape_fn((file.frames.len(), height, width), |(row, _, _)| {
        T::from_f64(file.frames[row] as f64 * dataset.scale)
    });
    h5.new_dataset_builder()
        .with_data(&data)
        .create(dataset.name.as_str())
        .map_err(|e| {
            VdsError::hdf5(
                format!("writing dataset '{}' of file {}", dataset.name, file.file_number),
                e.to_string(),
            )
        })?;
    Ok(())
}
