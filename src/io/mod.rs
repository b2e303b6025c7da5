// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for acquisition containers.
//!
//! This module provides the file naming convention shared with the
//! file-writer pool and the HDF5 commit of virtual layouts.

pub mod container;
pub mod naming;

pub use container::{
    commit_layouts, write_synthetic_file, write_synthetic_sources, SyntheticDataset,
};
pub use naming::{physical_file_name, physical_file_path, vds_file_name, vds_file_path};
