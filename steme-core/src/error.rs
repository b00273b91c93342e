//! Error types for steme.

use thiserror::Error;

/// Errors that can occur in steme operations.
#[derive(Error, Debug)]
pub enum StemeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month {0}. Expected 1-12")]
    InvalidMonth(u32),

    #[error("Avatar fetch failed: {0}")]
    AvatarFetch(String),

    #[error("Avatar fetch timed out after {0}s")]
    AvatarTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for steme operations.
pub type StemeResult<T> = Result<T, StemeError>;
