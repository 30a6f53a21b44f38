//! Error types for cal-core

use thiserror::Error;

/// Main error type for cal-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event not found: {0}")]
    EventNotFound(i64),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type alias for cal-core
pub type Result<T> = std::result::Result<T, Error>;
