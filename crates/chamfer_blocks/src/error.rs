//! # Block Error Types
//!
//! Classification itself cannot fail; only loading configuration can.

use thiserror::Error;

/// Errors that can occur while setting up classification.
#[derive(Error, Debug)]
pub enum BlocksError {
    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for block operations.
pub type BlocksResult<T> = Result<T, BlocksError>;
