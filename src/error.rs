//! Error types for the processing pipeline

use std::fmt;

/// Errors that can occur while processing, analyzing or exporting audio
#[derive(Debug, Clone, PartialEq)]
pub enum DspError {
    /// Caller contract violation (unsupported bit depth, bad FFT size, zero rate, ...)
    InvalidParameter(String),

    /// Channel arrays of differing length
    ChannelMismatch(String),

    /// Audio decoding error
    DecodingError(String),

    /// Payload cannot be represented in the output container
    EncodingError(String),

    /// I/O failure while writing an export
    Io(String),
}

impl fmt::Display for DspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DspError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            DspError::ChannelMismatch(msg) => write!(f, "Channel mismatch: {}", msg),
            DspError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            DspError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            DspError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for DspError {}

impl From<std::io::Error> for DspError {
    fn from(err: std::io::Error) -> Self {
        DspError::Io(err.to_string())
    }
}

impl From<symphonia::core::errors::Error> for DspError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        DspError::DecodingError(err.to_string())
    }
}
