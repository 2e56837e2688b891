//! Core error types for masterytrack-core.
//!
//! Every fallible operation in the library reports one of these enums.
//! Entry points that touch both config and storage return [`CoreError`].
//! Loading persisted state has no variant: unreadable state degrades to an
//! empty store instead of an error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for masterytrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Record mapping could not be encoded for saving
    #[error("Failed to encode skill records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Attempt inputs that violate the caller contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttemptError {
    #[error("skill id must not be empty")]
    EmptySkillId,

    #[error("latency must be a non-negative number of milliseconds, got {0}")]
    InvalidLatency(f64),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked
                    || inner.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_converts_into_core_error() {
        let err: CoreError = StorageError::Locked.into();
        assert!(matches!(err, CoreError::Storage(StorageError::Locked)));
        assert_eq!(err.to_string(), "Storage error: Database is locked");
    }

    #[test]
    fn attempt_error_message_names_latency() {
        let err = AttemptError::InvalidLatency(-1.0);
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn non_sqlite_failure_maps_to_query_failed() {
        let err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StorageError::QueryFailed(_)));
    }
}
