//! Error types for seating-core
//!
//! - **Configuration errors**: request parameters that violate the layout
//!   contract (exit code 1)
//! - **Config/parse errors**: malformed engine config or input files (exit code 1)
//! - **System errors**: artifact IO (exit code 2)
//! - **Lookup errors**: unknown table or guest (exit code 3)

use thiserror::Error;

/// Core error type for layout operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Layout parameters cannot produce a valid layout
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Engine configuration file or environment is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reading or writing the artifact failed
    #[error("IO error: {0}")]
    Io(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid-config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an IO error
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Process exit code for this error category
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::InvalidConfig(_) | Self::Parse(_) => 1,
            Self::Io(_) => 2,
            Self::NotFound(_) => 3,
        }
    }
}

/// Result type alias for seating-core operations
pub type Result<T> = std::result::Result<T, Error>;
