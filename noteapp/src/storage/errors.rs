//! Error types for storage operations

use std::error::Error;
use std::fmt;

/// Error type for storage operations
#[derive(Debug)]
pub enum StorageError {
    /// Configuration error
    Configuration(String),

    /// Connection error
    Connection(String),

    /// Query error
    Query(String),

    /// Internal error
    Internal(String),

    /// Data not found
    NotFound(String),

    /// Item already exists (unique key or unique index violation)
    AlreadyExists(String),

    /// Serialization/deserialization error
    Serialization(String),

}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Classify a SurrealDB error raised by a write.
    ///
    /// Record-key collisions and unique index violations both surface as
    /// [`StorageError::AlreadyExists`]; everything else is a query failure.
    pub fn from_write(err: surrealdb::Error, context: &str) -> Self {
        let message = err.to_string();
        if message.contains("already exists") || message.contains("already contains") {
            StorageError::AlreadyExists(format!("{}: {}", context, message))
        } else {
            StorageError::Query(format!("{}: {}", context, message))
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            StorageError::Connection(msg) => write!(f, "Connection error: {}", msg),
            StorageError::Query(msg) => write!(f, "Query error: {}", msg),
            StorageError::Internal(msg) => write!(f, "Internal error: {}", msg),
            StorageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            StorageError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for StorageError {}

/// Convert a JSON error to a storage error
impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
