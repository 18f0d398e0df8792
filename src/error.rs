use thiserror::Error;

/// Errors raised by the gateway and its transport
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("Invalid source '{locator}': {reason}")]
    InvalidSource { locator: String, reason: String },

    /// The delivery task owns the read half, so it can only be spawned once
    #[error("Gateway delivery task already started")]
    AlreadyStarted,
}

/// Command line could not be understood
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unexpected arguments: {0:?}")]
pub struct UsageError(pub Vec<String>);
