// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sample datatypes for frame datasets.
//!
//! Names follow the numpy-style strings reported by the file writers
//! (`uint16`, `float32`, ...). The bare `float` alias means 64-bit float.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::VdsError;

/// Element type of every frame in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dtype {
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit IEEE float
    Float32,
    /// 64-bit IEEE float
    #[default]
    Float64,
}

impl Dtype {
    /// Unsigned type matching a detector bit depth.
    pub fn from_bit_depth(bits: u32) -> Result<Self, VdsError> {
        match bits {
            8 => Ok(Dtype::UInt8),
            16 => Ok(Dtype::UInt16),
            32 => Ok(Dtype::UInt32),
            64 => Ok(Dtype::UInt64),
            other => Err(VdsError::invalid_config(
                "bit_depth",
                format!("unsupported detector bit depth {other}"),
            )),
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dtype::UInt8 => "uint8",
            Dtype::UInt16 => "uint16",
            Dtype::UInt32 => "uint32",
            Dtype::UInt64 => "uint64",
            Dtype::Int8 => "int8",
            Dtype::Int16 => "int16",
            Dtype::Int32 => "int32",
            Dtype::Int64 => "int64",
            Dtype::Float32 => "float32",
            Dtype::Float64 => "float64",
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dtype {
    type Err = VdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uint8" | "u8" => Ok(Dtype::UInt8),
            "uint16" | "u16" => Ok(Dtype::UInt16),
            "uint32" | "u32" => Ok(Dtype::UInt32),
            "uint64" | "u64" => Ok(Dtype::UInt64),
            "int8" | "i8" => Ok(Dtype::Int8),
            "int16" | "i16" => Ok(Dtype::Int16),
            "int32" | "i32" => Ok(Dtype::Int32),
            "int64" | "i64" => Ok(Dtype::Int64),
            "float32" | "f32" | "single" => Ok(Dtype::Float32),
            "float" | "float64" | "f64" | "double" => Ok(Dtype::Float64),
            other => Err(VdsError::invalid_config(
                "dtype",
                format!("unknown dtype '{other}'"),
            )),
        }
    }
}

impl TryFrom<String> for Dtype {
    type Error = VdsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dtype> for String {
    fn from(dtype: Dtype) -> Self {
        dtype.as_str().to_string()
    }
}
