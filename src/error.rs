//! Error types for datewalk.
//!
//! Only configuration-level failures are fatal. Everything that goes wrong
//! during traversal (an unreadable directory, a filename without a date) is
//! handled locally by the walker and never surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// A fatal configuration error, detected before traversal starts.
///
/// Each variant maps to a distinct process exit code so callers and scripts
/// can tell the failure causes apart.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Concurrency limit below the minimum of one
    #[error("invalid concurrency {requested}: must be at least 1")]
    InvalidConcurrency { requested: usize },

    /// Concurrency limit above the number of available CPU cores
    #[error("concurrency {requested} exceeds available cpu count {cpus}")]
    ConcurrencyExceedsCpus { requested: usize, cpus: usize },

    /// A traversal root that does not exist or is not a directory
    #[error("invalid root '{}': {}", .path.display(), .reason)]
    InvalidRoot { path: PathBuf, reason: String },

    /// A malformed output template
    #[error("invalid output template: {reason} at byte {position}")]
    Template { reason: String, position: usize },
}

impl ConfigError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::InvalidConcurrency { .. } => 2,
            ConfigError::ConcurrencyExceedsCpus { .. } => 3,
            ConfigError::InvalidRoot { .. } => 4,
            ConfigError::Template { .. } => 5,
        }
    }
}

/// Validates a requested listing-concurrency limit against the host.
///
/// The valid range is `1..=cpus` where `cpus` is the number of available CPU
/// cores. Values outside the range are rejected rather than clamped.
pub fn validate_concurrency(requested: usize) -> Result<usize, ConfigError> {
    if requested < 1 {
        return Err(ConfigError::InvalidConcurrency { requested });
    }
    let cpus = num_cpus::get();
    if requested > cpus {
        return Err(ConfigError::ConcurrencyExceedsCpus { requested, cpus });
    }
    Ok(requested)
}
