//! Error types for clicktrack

use thiserror::Error;

/// The output device could not be opened or resumed.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("No audio output devices found")]
    NoDevices,
    #[error("Failed to get default output config: {0}")]
    Config(String),
    #[error("Failed to build output stream: {0}")]
    Stream(String),
    #[error("Failed to resume output stream: {0}")]
    Resume(String),
    #[error("Output device unavailable: {0}")]
    Unavailable(String),
}

/// A configuration snapshot was rejected. The configuration is left untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Malformed snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Snapshot must be a JSON object")]
    NotAnObject,
    #[error("Unsupported snapshot version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u64, supported: u32 },
}
