//! Error types for the SPA engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a session
#[derive(Error, Debug)]
pub enum Error {
    /// A fragment fetch returned a non-success HTTP status
    #[error("Failed to load page at {resource} (status {status})")]
    PageLoad { resource: String, status: u16 },

    /// Transport-level failure raised by the fetch mechanism itself
    #[error("Network error: {0}")]
    Network(String),

    /// Preference storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
