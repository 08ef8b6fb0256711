//! Error types for PostureGuard

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum PostureError {
    /// Window size outside 1..=MAX_CAPACITY
    #[error("Invalid capacity {0}: a stability window holds 1 to {max} slots", max = crate::MAX_CAPACITY)]
    InvalidCapacity(usize),

    /// Upstream classification handed over a code outside the posture alphabet
    #[error("Contract violation: '{code}' is not a posture code (expected u, r or f)")]
    ContractViolation { code: char },

    /// Malformed tick token on the CLI / API boundary
    #[error("Invalid tick '{0}': expected <back><neck> codes, '-' for no sample")]
    InvalidTick(String),

    /// Configuration could not be parsed or serialized
    #[error("Config error: {0}")]
    Config(String),

    /// IO error (config file access)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for PostureError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for PostureError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, PostureError>;
