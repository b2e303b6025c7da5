// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout odin-vds.
//!
//! - [`VdsError`] - Error taxonomy for validation and commit failures
//! - [`Dtype`] - Frame element type vocabulary

pub mod dtype;
pub mod error;

pub use dtype::Dtype;
pub use error::{Result, VdsError};
