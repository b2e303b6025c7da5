// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File naming conventions of the file-writer pool.
//!
//! Physical files are `{prefix}_{file_number:06}.h5`, numbered from 1. The
//! virtual container is `{prefix}_vds.h5` in the same directory.

use std::path::{Path, PathBuf};

/// Extension used by every container file.
pub const CONTAINER_EXTENSION: &str = "h5";

/// Suffix of the virtual container name.
pub const VDS_SUFFIX: &str = "vds";

/// Name of the physical file with the given 1-based number.
pub fn physical_file_name(prefix: &str, file_number: usize) -> String {
    format!("{prefix}_{file_number:06}.{CONTAINER_EXTENSION}")
}

/// Full path of a physical file.
pub fn physical_file_path(dir: &Path, prefix: &str, file_number: usize) -> PathBuf {
    dir.join(physical_file_name(prefix, file_number))
}

/// Name of the virtual container.
pub fn vds_file_name(prefix: &str) -> String {
    format!("{prefix}_{VDS_SUFFIX}.{CONTAINER_EXTENSION}")
}

/// Full path of the virtual container.
pub fn vds_file_path(dir: &Path, prefix: &str) -> PathBuf {
    dir.join(vds_file_name(prefix))
}
