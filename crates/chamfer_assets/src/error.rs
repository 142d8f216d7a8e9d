//! # Asset Error Types

use std::io;

use thiserror::Error;

/// Errors that can occur reading or writing voxel files.
#[derive(Error, Debug)]
pub enum VoxError {
    /// File I/O error, including truncated input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The data is not a voxel file, or cannot be written as one.
    #[error("invalid VOX format: {0}")]
    InvalidFormat(String),

    /// The version field is outside the supported range.
    #[error("unsupported VOX version: {0}")]
    UnsupportedVersion(u32),

    /// A required record is absent; no volume can be produced.
    #[error("missing required chunk: {0}")]
    MissingChunk(&'static str),

    /// A record is present but its contents are malformed.
    #[error("invalid chunk: {0}")]
    InvalidChunk(String),
}

/// Result type for asset operations.
pub type VoxResult<T> = Result<T, VoxError>;
