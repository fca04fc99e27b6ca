//! Error types for flight2ics.

use thiserror::Error;

/// Errors that can occur in flight2ics operations.
#[derive(Error, Debug)]
pub enum Flight2IcsError {
    #[error("Please enter a flight number")]
    EmptyFlightNumber,

    #[error("Invalid flight number format. Expected format: AB123")]
    InvalidFlightNumber { input: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Flight2IcsError {
    /// Whether the error was caused by the caller's input rather than the system.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Flight2IcsError::EmptyFlightNumber | Flight2IcsError::InvalidFlightNumber { .. }
        )
    }
}

/// Result type alias for flight2ics operations.
pub type Flight2IcsResult<T> = Result<T, Flight2IcsError>;
