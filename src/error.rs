//! Error types for Lector

use std::io;
use thiserror::Error;

/// Main error type for Lector
///
/// Variants follow where an error can hurt: a malformed command or a failed
/// synthesis is local to one document, a dead channel ends the whole run.
#[derive(Error, Debug)]
pub enum LectorError {
    #[error("Command parse error: {0}")]
    CommandParse(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Device error: {0}")]
    Device(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Playlist error: {0}")]
    Playlist(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Lector operations
pub type Result<T> = std::result::Result<T, LectorError>;

impl From<String> for LectorError {
    fn from(s: String) -> Self {
        LectorError::Other(s)
    }
}

impl From<&str> for LectorError {
    fn from(s: &str) -> Self {
        LectorError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for LectorError {
    fn from(e: serde_json::Error) -> Self {
        LectorError::Playlist(format!("JSON error: {}", e))
    }
}
