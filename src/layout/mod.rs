// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Layout planning for interleaved acquisitions.
//!
//! - [`distribution`] - Which physical file holds which frames
//! - [`virtual_layout`] - Mapping physical rows into the logical array
//! - [`block`] - The block-strided address pattern
//! - [`simulate`] - Independent model of the round-robin writer pool

pub mod block;
pub mod distribution;
pub mod simulate;
pub mod virtual_layout;

pub use block::BlockStride;
pub use distribution::{frame_distribution, frames_per_writer, FileFrames, FrameDistribution};
pub use simulate::{RoundRobinSimulation, SimulatedFile};
pub use virtual_layout::{build_layout, SourceMapping, TargetRegion, VirtualLayout};
