// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for odin-vds.
//!
//! Provides error types for layout assembly:
//! - Request validation (fails before any file I/O)
//! - Configuration file loading
//! - HDF5 container commits
//! - Internal layout invariants

use thiserror::Error;

/// Errors that can occur while planning or committing a virtual layout.
#[derive(Debug, Clone, Error)]
pub enum VdsError {
    /// A request parameter is out of range or inconsistent.
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending parameter
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("Config error in {source_name}: {message}")]
    Config {
        /// File path or other description of the config source
        source_name: String,
        /// Error message
        message: String,
    },

    /// HDF5 library failure while creating the container.
    #[error("HDF5 error while {context}: {message}")]
    Hdf5 {
        /// What was being done
        context: String,
        /// Error message reported by the library
        message: String,
    },

    /// Internal consistency check failed.
    #[error("Invariant violation: {invariant}")]
    InvariantViolation {
        /// Description of the invariant that was violated
        invariant: String,
    },
}

impl VdsError {
    /// Create an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        VdsError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a config file error.
    pub fn config(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        VdsError::Config {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create an HDF5 error with context.
    pub fn hdf5(context: impl Into<String>, message: impl Into<String>) -> Self {
        VdsError::Hdf5 {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant_violation(invariant: impl Into<String>) -> Self {
        VdsError::InvariantViolation {
            invariant: invariant.into(),
        }
    }

    /// True for errors raised by request validation.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, VdsError::InvalidConfig { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            VdsError::InvalidConfig { field, reason } => {
                vec![("field", field.clone()), ("reason", reason.clone())]
            }
            VdsError::Config {
                source_name,
                message,
            } => vec![("source", source_name.clone()), ("message", message.clone())],
            VdsError::Hdf5 { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            VdsError::InvariantViolation { invariant } => {
                vec![("invariant", invariant.clone())]
            }
        }
    }
}

impl From<hdf5::Error> for VdsError {
    fn from(err: hdf5::Error) -> Self {
        VdsError::Hdf5 {
            context: "accessing container".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VdsError {
    fn from(err: toml::de::Error) -> Self {
        VdsError::Config {
            source_name: "TOML".to_string(),
            message: err.message().to_string(),
        }
    }
}

/// Result type for odin-vds operations.
pub type Result<T> = std::result::Result<T, VdsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_error() {
        let err = VdsError::invalid_config("frames_per_block", "must be greater than zero");
        assert!(err.is_invalid_config());
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'frames_per_block': must be greater than zero"
        );
    }

    #[test]
    fn test_hdf5_error() {
        let err = VdsError::hdf5("creating dataset 'data'", "boom");
        assert!(matches!(err, VdsError::Hdf5 { .. }));
        assert!(!err.is_invalid_config());
        assert_eq!(
            err.to_string(),
            "HDF5 error while creating dataset 'data': boom"
        );
    }

    #[test]
    fn test_config_error() {
        let err = VdsError::config("acq.toml", "missing field");
        assert_eq!(err.to_string(), "Config error in acq.toml: missing field");
    }

    #[test]
    fn test_invariant_violation_error() {
        let err = VdsError::invariant_violation("frames sum to 9, expected 10");
        assert_eq!(
            err.to_string(),
            "Invariant violation: frames sum to 9, expected 10"
        );
    }

    #[test]
    fn test_log_fields_invalid_config() {
        let err = VdsError::invalid_config("prefix", "empty");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("field", "prefix".to_string()));
        assert_eq!(fields[1], ("reason", "empty".to_string()));
    }

    #[test]
    fn test_log_fields_hdf5() {
        let err = VdsError::hdf5("ctx", "msg");
        let fields = err.log_fields();
        assert_eq!(fields[0].0, "context");
        assert_eq!(fields[1].1, "msg");
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = toml::from_str::<toml::Table>("frame_count = ").unwrap_err();
        let err: VdsError = toml_err.into();
        assert!(matches!(err, VdsError::Config { .. }));
    }

    #[test]
    fn test_error_clone() {
        let err1 = VdsError::invalid_config("a", "b");
        let err2 = err1.clone();
        assert_eq!(err1.to_string(), err2.to_string());
    }
}
