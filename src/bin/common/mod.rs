// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use clap::Args;
use odin_vds::{AcquisitionLayoutRequest, AcquisitionLayoutRequestBuilder, Dtype};
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the stderr log subscriber.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // a subscriber may already be installed when running under a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse a frame shape given as `HxW` or `H,W`.
pub fn parse_shape(s: &str) -> CliResult<(usize, usize)> {
    let (h, w) = s
        .split_once(['x', 'X', ','])
        .ok_or_else(|| anyhow::anyhow!("Frame shape must be HxW, got '{s}'"))?;
    let h = h
        .trim()
        .parse::<usize>()
        .map_err(|e| anyhow::anyhow!("Invalid frame height '{h}': {e}"))?;
    let w = w
        .trim()
        .parse::<usize>()
        .map_err(|e| anyhow::anyhow!("Invalid frame width '{w}': {e}"))?;
    Ok((h, w))
}

/// Acquisition parameters shared by every command.
///
/// Flags override values loaded from `--config`.
#[derive(Args, Clone, Debug, Default)]
pub struct AcquisitionArgs {
    /// TOML file with acquisition parameters
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the acquisition files
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// File name prefix of the acquisition
    #[arg(long)]
    pub prefix: Option<String>,

    /// Total number of frames
    #[arg(short = 'n', long = "frames")]
    pub frame_count: Option<usize>,

    /// Frames per block
    #[arg(short = 'b', long)]
    pub frames_per_block: Option<usize>,

    /// Blocks per physical file (0 = unlimited)
    #[arg(long)]
    pub blocks_per_file: Option<usize>,

    /// Number of file writers
    #[arg(short = 'w', long = "writers")]
    pub n_file_writers: Option<usize>,

    /// Frame shape as HxW
    #[arg(long, value_parser = parse_shape)]
    pub shape: Option<(usize, usize)>,

    /// Element type (uint8, uint16, uint32, float32, float, ...)
    #[arg(long)]
    pub dtype: Option<Dtype>,

    /// Detector bit depth, sets dtype to uint<N>
    #[arg(long, conflicts_with = "dtype")]
    pub bit_depth: Option<u32>,

    /// Dataset name (repeatable)
    #[arg(short = 'd', long = "dataset", value_name = "NAME")]
    pub datasets: Vec<String>,
}

impl AcquisitionArgs {
    /// Merge config file and flags into a builder.
    pub fn builder(&self) -> Result<AcquisitionLayoutRequestBuilder> {
        let mut builder = match &self.config {
            Some(path) => AcquisitionLayoutRequestBuilder::from_toml_file(path)?,
            None => AcquisitionLayoutRequest::builder(),
        };

        if let Some(path) = &self.path {
            builder = builder.path(path);
        }
        if let Some(prefix) = &self.prefix {
            builder = builder.prefix(prefix.clone());
        }
        if let Some(frames) = self.frame_count {
            builder = builder.frame_count(frames);
        }
        if let Some(block) = self.frames_per_block {
            builder = builder.frames_per_block(block);
        }
        if let Some(per_file) = self.blocks_per_file {
            builder = builder.blocks_per_file(per_file);
        }
        if let Some(writers) = self.n_file_writers {
            builder = builder.n_file_writers(writers);
        }
        if let Some((h, w)) = self.shape {
            builder = builder.frame_shape(h, w);
        }
        if let Some(dtype) = self.dtype {
            builder = builder.dtype(dtype);
        }
        if let Some(bits) = self.bit_depth {
            builder = builder.dtype(Dtype::from_bit_depth(bits)?);
        }
        if !self.datasets.is_empty() {
            builder = builder.dataset_names(self.datasets.clone());
        }
        Ok(builder)
    }

    /// Merge and validate.
    pub fn request(&self) -> Result<AcquisitionLayoutRequest> {
        Ok(self.builder()?.build()?)
    }
}

/// Progress bar wrapper for consistent progress reporting.
pub struct ProgressBar {
    inner: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a new progress bar; hidden when stderr is not a terminal.
    pub fn new(total: u64, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let inner = if std::io::stderr().is_terminal() {
            let pb = indicatif::ProgressBar::new(total);
            if let Ok(style) = indicatif::ProgressStyle::default_bar()
                .template("{prefix} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb.set_prefix(prefix);
            Some(pb)
        } else {
            None
        };

        Self { inner }
    }

    /// Advance by one.
    pub fn inc(&self) {
        if let Some(pb) = &self.inner {
            pb.inc(1);
        }
    }

    /// Finish the progress bar with a message.
    pub fn finish_with_message(&self, msg: String) {
        if let Some(pb) = &self.inner {
            pb.finish_with_message(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape() {
        assert_eq!(parse_shape("2x3").unwrap(), (2, 3));
        assert_eq!(parse_shape("2162,2068").unwrap(), (2162, 2068));
        assert_eq!(parse_shape(" 4 X 5 ").unwrap(), (4, 5));
        assert!(parse_shape("10").is_err());
        assert!(parse_shape("ax2").is_err());
    }

    #[test]
    fn test_flags_build_request() {
        let args = AcquisitionArgs {
            prefix: Some("scan".to_string()),
            frame_count: Some(19),
            frames_per_block: Some(2),
            blocks_per_file: Some(2),
            shape: Some((2, 2)),
            bit_depth: Some(16),
            datasets: vec!["data".to_string(), "data2".to_string()],
            ..Default::default()
        };
        let request = args.request().unwrap();
        assert_eq!(request.dtype(), Dtype::UInt16);
        assert_eq!(request.n_file_writers(), 4);
        assert_eq!(request.dataset_names().len(), 2);
    }

    #[test]
    fn test_missing_prefix_is_rejected() {
        let args = AcquisitionArgs {
            frame_count: Some(10),
            shape: Some((1, 1)),
            ..Default::default()
        };
        let err = args.request().unwrap_err();
        assert!(err.to_string().contains("prefix"));
    }
}
