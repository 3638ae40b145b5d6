//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': expected a number")]
    InvalidNumber { name: &'static str, value: String },

    /// A threshold is outside `[0, 1]`.
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    /// External API calls must stay spaced out.
    #[error("{name} must be greater than zero")]
    ZeroRateLimit { name: &'static str },

    /// A count that must be at least one.
    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },

    /// The knowledge-base source is not one of the supported values.
    #[error("unknown knowledge-base source '{value}' (expected 'wikipedia' or 'wikidata')")]
    UnknownKbSource { value: String },

    /// The inconclusive output policy is not one of the supported values.
    #[error("unknown inconclusive policy '{value}' (expected 'incorrect' or 'inconclusive')")]
    UnknownInconclusivePolicy { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
