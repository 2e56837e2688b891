mod config;
pub mod database;
pub mod persistence;

pub use config::{Config, EngineConfig, CONFIG_FILE};
pub use database::{Database, DATABASE_FILE};
pub use persistence::{KvPersistence, MemoryPersistence, PersistenceAdapter, STORAGE_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `MASTERYTRACK_DATA_DIR` wins when set. Otherwise
/// `~/.config/masterytrack[-dev]/`, with MASTERYTRACK_ENV=dev selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("MASTERYTRACK_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("MASTERYTRACK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("masterytrack-dev")
            } else {
                base_dir.join("masterytrack")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
