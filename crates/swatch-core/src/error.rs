//! Error types for swatch-core

use thiserror::Error;

use crate::ase::AseError;

/// Result type for swatch-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// A decode failure attributed to one input file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}: {error}")]
pub struct FileError {
    /// Identifier of the failed file
    pub file: String,
    /// Why it failed
    #[source]
    pub error: AseError,
}

/// Errors that can occur in swatch-core operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A file could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] FileError),

    /// Collection list could not be read or written
    #[error("Collection list error: {0}")]
    Collections(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
