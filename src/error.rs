//! Error handling for Xenophon
//!
//! This module defines the error types used throughout the crate. The
//! variants fall into a few families that callers can tell apart:
//! resolution failures (location or environment could not be captured),
//! storage failures (the engine itself broke), integrity failures (the
//! engine returned something malformed) and not-found.

use std::io;
use thiserror::Error;

/// Result type alias for Xenophon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Xenophon operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Regex compilation failed
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The location provider could not determine where the command ran
    #[error("location could not be determined: {source}")]
    LocationResolution { source: Box<Error> },

    /// The environment provider could not produce a snapshot
    #[error("environment could not be determined: {source}")]
    EnvironmentResolution { source: Box<Error> },

    /// The storage engine handed back an entry without an id or timestamp
    #[error("insert returned bad data: {reason}")]
    BadDataInsert { reason: String },

    /// A row that was just written could not be read back
    #[error("could not find entry {id}")]
    EntryNotFound { id: i64 },

    /// Home directory could not be determined
    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Invalid command line arguments
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Invalid timestamp format
    #[error("Invalid timestamp format: {timestamp}")]
    InvalidTimestamp { timestamp: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {field} - {reason}")]
    ConfigValidation { field: String, reason: String },

    /// Generic error with custom message
    #[error("{message}")]
    Custom { message: String },
}

impl Error {
    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Error::Custom {
            message: message.into(),
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Error::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a config validation error
    pub fn config_validation<S: Into<String>>(field: S, reason: S) -> Self {
        Error::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a bad data insert error
    pub fn bad_data_insert<S: Into<String>>(reason: S) -> Self {
        Error::BadDataInsert {
            reason: reason.into(),
        }
    }

    /// Wrap a provider failure as a location resolution error
    pub fn location_resolution(source: Error) -> Self {
        Error::LocationResolution {
            source: Box::new(source),
        }
    }

    /// Wrap a provider failure as an environment resolution error
    pub fn environment_resolution(source: Error) -> Self {
        Error::EnvironmentResolution {
            source: Box::new(source),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::LocationResolution { .. } | Error::EnvironmentResolution { .. } => true,
            Error::BadDataInsert { .. } => false,
            Error::EntryNotFound { .. } => false,
            Error::InvalidArguments { .. } => false,
            Error::HomeDirectoryNotFound => false,
            _ => true,
        }
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Error::Io(_) | Error::Database(_) => "storage",
            Error::Regex(_) => "regex",
            Error::Json(_) => "json",
            Error::LocationResolution { .. } | Error::EnvironmentResolution { .. } => "resolution",
            Error::BadDataInsert { .. } => "integrity",
            Error::EntryNotFound { .. } => "not_found",
            Error::ConfigValidation { .. } => "config",
            Error::HomeDirectoryNotFound => "system",
            Error::InvalidArguments { .. } => "arguments",
            Error::InvalidTimestamp { .. } => "timestamp",
            Error::Custom { .. } => "custom",
        }
    }
}
