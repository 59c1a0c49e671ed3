//! Error types for the qubit lab.
//!
//! The numeric engine itself is total: gate application, projection, sampling
//! and amplitude amplification never fail. Errors only arise at the boundary,
//! when a gate name, search size or configuration arrives from outside.

use thiserror::Error;

/// Result type alias for lab operations.
pub type Result<T> = std::result::Result<T, LabError>;

/// Errors raised while validating input handed to the engine.
#[derive(Error, Debug)]
pub enum LabError {
    /// Gate symbol is not part of the catalog.
    #[error("Unknown gate '{0}' (expected one of H, X, Y, Z, S, T)")]
    UnknownGate(String),

    /// Search-space size outside the supported menu.
    #[error("Unsupported search size {0} (expected 4, 8, 16 or 32)")]
    UnsupportedSearchSize(usize),

    /// Target index does not address an entry of the search space.
    #[error("Target index {target} out of range for search size {size}")]
    TargetOutOfRange {
        /// Requested target index.
        target: usize,
        /// Size of the search space.
        size: usize,
    },

    /// Invalid configuration value.
    #[error("Invalid config '{name}': {reason}")]
    InvalidConfig {
        /// Field name.
        name: String,
        /// Reason the value was rejected.
        reason: String,
    },

    /// Configuration document could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabError {
    /// Create an invalid-config error.
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a target-out-of-range error.
    pub fn target_out_of_range(target: usize, size: usize) -> Self {
        Self::TargetOutOfRange { target, size }
    }
}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
