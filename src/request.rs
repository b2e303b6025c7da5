// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Acquisition layout requests.
//!
//! An [`AcquisitionLayoutRequest`] carries everything needed to lay out one
//! acquisition: the writer geometry, the frame shape and type, the dataset
//! names and where the files live. It is validated once, when built, so the
//! planner and builder can rely on non-zero divisors.
//!
//! Requests come either from [`AcquisitionLayoutRequestBuilder`] or from a
//! TOML file:
//!
//! ```toml
//! path = "/data/2026-10-17"
//! prefix = "scan_0042"
//! frame_count = 1000
//! frames_per_block = 100
//! blocks_per_file = 2
//! frame_shape = [2162, 2068]
//! dtype = "uint16"
//! n_file_writers = 4
//! dataset_names = ["data"]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Dtype, Result, VdsError};

/// Number of file writers in a standard deployment.
pub const DEFAULT_FILE_WRITERS: usize = 4;

/// Dataset written by the file writers when nothing else is configured.
pub const DEFAULT_DATASET_NAME: &str = "data";

/// Validated description of one acquisition's files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcquisitionLayoutRequest {
    path: PathBuf,
    prefix: String,
    dataset_names: Vec<String>,
    frame_count: usize,
    frames_per_block: usize,
    blocks_per_file: usize,
    frame_shape: (usize, usize),
    dtype: Dtype,
    n_file_writers: usize,
}

impl AcquisitionLayoutRequest {
    /// Start building a request.
    pub fn builder() -> AcquisitionLayoutRequestBuilder {
        AcquisitionLayoutRequestBuilder::new()
    }

    /// Parse and validate a request from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        AcquisitionLayoutRequestBuilder::from_toml_str(text)?.build()
    }

    /// Read, parse and validate a request from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        AcquisitionLayoutRequestBuilder::from_toml_file(path)?.build()
    }

    /// Directory holding the physical files and the virtual container.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name prefix shared by the acquisition's files.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Datasets to expose, in commit order.
    pub fn dataset_names(&self) -> &[String] {
        &self.dataset_names
    }

    /// Total frames acquired.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Frames each writer takes per turn.
    pub fn frames_per_block(&self) -> usize {
        self.frames_per_block
    }

    /// Blocks per physical file, 0 for unlimited.
    pub fn blocks_per_file(&self) -> usize {
        self.blocks_per_file
    }

    /// `(H, W)` of one frame.
    pub fn frame_shape(&self) -> (usize, usize) {
        self.frame_shape
    }

    /// Element type of the frames.
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    /// Number of round-robin writers.
    pub fn n_file_writers(&self) -> usize {
        self.n_file_writers
    }
}

/// Builder for [`AcquisitionLayoutRequest`].
///
/// Also the deserialization target for TOML configs; missing keys take the
/// builder defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcquisitionLayoutRequestBuilder {
    path: PathBuf,
    prefix: String,
    dataset_names: Vec<String>,
    frame_count: usize,
    frames_per_block: usize,
    blocks_per_file: usize,
    frame_shape: (usize, usize),
    dtype: Dtype,
    n_file_writers: usize,
}

impl Default for AcquisitionLayoutRequestBuilder {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            prefix: String::new(),
            dataset_names: vec![DEFAULT_DATASET_NAME.to_string()],
            frame_count: 0,
            frames_per_block: 1,
            blocks_per_file: 0,
            frame_shape: (0, 0),
            dtype: Dtype::default(),
            n_file_writers: DEFAULT_FILE_WRITERS,
        }
    }
}

impl AcquisitionLayoutRequestBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded from TOML text. Nothing is validated until `build()`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Builder preloaded from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| VdsError::config(path.display().to_string(), e.to_string()))?;
        toml::from_str(&text)
            .map_err(|e| VdsError::config(path.display().to_string(), e.message()))
    }

    /// Set the acquisition directory.
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Set the file name prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replace the dataset names.
    pub fn dataset_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dataset_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the total number of frames.
    pub fn frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }

    /// Set the block size in frames.
    pub fn frames_per_block(mut self, frames_per_block: usize) -> Self {
        self.frames_per_block = frames_per_block;
        self
    }

    /// Set the blocks per physical file (0 = unlimited).
    pub fn blocks_per_file(mut self, blocks_per_file: usize) -> Self {
        self.blocks_per_file = blocks_per_file;
        self
    }

    /// Set the `(H, W)` frame shape.
    pub fn frame_shape(mut self, height: usize, width: usize) -> Self {
        self.frame_shape = (height, width);
        self
    }

    /// Set the element type.
    pub fn dtype(mut self, dtype: Dtype) -> Self {
        self.dtype = dtype;
        self
    }

    /// Set the number of file writers.
    pub fn n_file_writers(mut self, n_file_writers: usize) -> Self {
        self.n_file_writers = n_file_writers;
        self
    }

    /// Validate and build the request.
    pub fn build(self) -> Result<AcquisitionLayoutRequest> {
        if self.frame_count == 0 {
            return Err(VdsError::invalid_config(
                "frame_count",
                "must be greater than zero",
            ));
        }
        if self.frames_per_block == 0 {
            return Err(VdsError::invalid_config(
                "frames_per_block",
                "must be greater than zero",
            ));
        }
        if self.n_file_writers == 0 {
            return Err(VdsError::invalid_config(
                "n_file_writers",
                "must be greater than zero",
            ));
        }
        if self.frame_shape.0 == 0 || self.frame_shape.1 == 0 {
            return Err(VdsError::invalid_config(
                "frame_shape",
                format!(
                    "dimensions must be non-zero, got ({}, {})",
                    self.frame_shape.0, self.frame_shape.1
                ),
            ));
        }
        if self
            .frames_per_block
            .checked_mul(self.blocks_per_file)
            .and_then(|f| f.checked_mul(self.n_file_writers))
            .is_none()
        {
            return Err(VdsError::invalid_config(
                "blocks_per_file",
                "file size in frames overflows",
            ));
        }
        // unlimited files span the whole acquisition per writer, and the
        // block count rounds frame_count up by one block
        let span_fits = self
            .frame_count
            .checked_mul(self.n_file_writers)
            .and(self.frames_per_block.checked_mul(self.n_file_writers))
            .and(self.frame_count.checked_add(self.frames_per_block))
            .is_some();
        if !span_fits {
            return Err(VdsError::invalid_config(
                "frame_count",
                format!(
                    "{} frames in blocks of {} over {} writers overflows",
                    self.frame_count, self.frames_per_block, self.n_file_writers
                ),
            ));
        }
        if self.prefix.is_empty() {
            return Err(VdsError::invalid_config("prefix", "must not be empty"));
        }
        if self.prefix.contains('/') || self.prefix.contains('\\') {
            return Err(VdsError::invalid_config(
                "prefix",
                format!("'{}' must be a file name, not a path", self.prefix),
            ));
        }
        if self.dataset_names.is_empty() {
            return Err(VdsError::invalid_config(
                "dataset_names",
                "at least one dataset is required",
            ));
        }
        let mut seen = HashSet::new();
        for name in &self.dataset_names {
            if name.trim().is_empty() {
                return Err(VdsError::invalid_config(
                    "dataset_names",
                    "dataset names must not be empty",
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(VdsError::invalid_config(
                    "dataset_names",
                    format!("duplicate dataset '{name}'"),
                ));
            }
        }

        Ok(AcquisitionLayoutRequest {
            path: self.path,
            prefix: self.prefix,
            dataset_names: self.dataset_names,
            frame_count: self.frame_count,
            frames_per_block: self.frames_per_block,
            blocks_per_file: self.blocks_per_file,
            frame_shape: self.frame_shape,
            dtype: self.dtype,
            n_file_writers: self.n_file_writers,
        })
    }
}
