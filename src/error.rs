use thiserror::Error;

/// Result type for bulb operations
pub type Result<T> = std::result::Result<T, BulbError>;

/// Errors that can occur when discovering or controlling a bulb
#[derive(Error, Debug)]
pub enum BulbError {
    /// The advertisement's location URL could not be parsed
    #[error("Malformed location {location:?}: {source}")]
    MalformedLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    /// The `Id` header was absent or not a valid hex number
    #[error("Missing or invalid device identifier: {0:?}")]
    MissingIdentifier(String),

    /// Could not connect to the bulb or write the command
    #[error("Connection to {addr} failed: {source}")]
    ConnectionFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Discovery returned no bulbs
    #[error("No device found")]
    DeviceNotFound,

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
