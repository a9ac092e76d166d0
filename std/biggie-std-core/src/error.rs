///
/// Runtime error types.
///
/// Contract violations the checked entry points report instead of
/// corrupting memory, plus output and configuration failures. Argument
/// type mismatches on the unchecked print path are not represented: on the
/// checked path they cannot compile.
///

use std::path::PathBuf;
use thiserror::Error;

/// Status codes returned across the C ABI
pub const BIGGIE_OK: i32 = 0;
pub const BIGGIE_ERR_OUT_OF_RANGE: i32 = 1;
pub const BIGGIE_ERR_EMPTY_CONTAINER: i32 = 2;
pub const BIGGIE_ERR_WRITE_FAILURE: i32 = 3;
pub const BIGGIE_ERR_CONFIG: i32 = 4;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Index {index} out of range for array of length {length}")]
    OutOfRange { index: usize, length: usize },

    #[error("Cannot remove the last element of an empty array")]
    EmptyContainer,

    #[error("Write failed: {0}")]
    WriteFailure(#[from] std::io::Error),

    #[error("Failed to read runtime config at {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Invalid runtime config: {0}")]
    InvalidConfig(String),
}

impl RuntimeError {
    pub fn status_code(&self) -> i32 {
        match self {
            RuntimeError::OutOfRange { .. } => BIGGIE_ERR_OUT_OF_RANGE,
            RuntimeError::EmptyContainer => BIGGIE_ERR_EMPTY_CONTAINER,
            RuntimeError::WriteFailure(_) => BIGGIE_ERR_WRITE_FAILURE,
            RuntimeError::Config { .. } | RuntimeError::InvalidConfig(_) => BIGGIE_ERR_CONFIG,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
