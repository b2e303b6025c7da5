// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # odin-vds
//!
//! Interleaved HDF5 virtual datasets for round-robin parallel file writers.
//!
//! A detector acquisition is split into blocks of frames that are dealt out
//! round-robin to several file-writer processes. Each writer produces its own
//! numbered sequence of HDF5 files. This crate computes which file and row
//! holds every logical frame and commits a single virtual container that
//! presents each dataset as one contiguous `(frames, H, W)` array, without
//! copying any sample data.
//!
//! ## Architecture
//!
//! - `layout/` - Pure planning: frame distribution, block-strided mappings,
//!   virtual layouts and a reference writer simulation
//! - `io/` - File naming and the HDF5 commit
//! - `request` - Validated acquisition parameters (builder or TOML)
//! - `assemble` - The [`create_interleave_vds`] entry point
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use odin_vds::{create_interleave_vds, AcquisitionLayoutRequest, Dtype};
//!
//! let request = AcquisitionLayoutRequest::builder()
//!     .path("/data/visit")
//!     .prefix("scan_0042")
//!     .frame_count(1000)
//!     .frames_per_block(100)
//!     .blocks_per_file(2)
//!     .frame_shape(2162, 2068)
//!     .dtype(Dtype::UInt16)
//!     .build()?;
//!
//! let report = create_interleave_vds(&request)?;
//! println!("wrote {}", report.output.display());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use self::core::{Dtype, Result, VdsError};

// Layout planning
pub mod layout;

pub use layout::{
    build_layout, frame_distribution, frames_per_writer, BlockStride, FileFrames,
    FrameDistribution, RoundRobinSimulation, SourceMapping, TargetRegion, VirtualLayout,
};

// Requests and configuration
pub mod request;

pub use request::{AcquisitionLayoutRequest, AcquisitionLayoutRequestBuilder};

// Container I/O
pub mod io;

// Assembly entry points
pub mod assemble;

pub use assemble::{
    create_interleave_vds, create_interleave_vds_with, plan_layouts, AssemblyReport,
};
