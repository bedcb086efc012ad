//! Error types for the command-line boundary.
//!
//! Every error maps to a stable code string for envelopes and to a process
//! exit status.

use geopin_core::GeoPinError;
use thiserror::Error;

/// Exit status for rejected input.
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Exit status for failures unrelated to the input values.
pub const EXIT_FAILURE: u8 = 1;

/// Error type for boundary operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Codec rejected the input.
    #[error(transparent)]
    Codec(#[from] GeoPinError),

    /// Timestamp is zero or negative.
    #[error("Invalid timestamp: {0} must be a positive number of seconds")]
    InvalidTimestamp(i64),

    /// Request body could not be parsed.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CliError {
    /// Stable machine-readable code for envelopes.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Codec(GeoPinError::InvalidCoordinate { .. }) => "INVALID_COORDINATE",
            Self::Codec(GeoPinError::InvalidElevation(_)) => "INVALID_ELEVATION",
            Self::Codec(GeoPinError::InvalidToken { .. }) => "INVALID_TOKEN",
            Self::Codec(GeoPinError::UnknownCharacter { .. }) => "UNKNOWN_CHARACTER",
            Self::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Codec(_) | Self::InvalidTimestamp(_) | Self::InvalidRequest(_) => {
                EXIT_INVALID_INPUT
            }
            Self::Io(_) | Self::Config(_) => EXIT_FAILURE,
        }
    }
}

/// Result type alias for boundary operations.
pub type Result<T> = std::result::Result<T, CliError>;
