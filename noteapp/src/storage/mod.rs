//! Storage abstractions and implementations
//!
//! The services only see the traits in [`traits`]. [`shared_storage`] provides
//! the SurrealDB-backed implementation, usable in memory (tests and
//! development), embedded on disk through RocksDB, or against a remote server.

pub mod config;
pub mod errors;
pub mod filters;
pub mod shared_storage;
pub mod traits;

use crate::config::NoteAppConfig;
use crate::storage::config::SurrealDBEngine;
use crate::storage::errors::StorageError;
use crate::storage::traits::NoteStore;

/// Create the store described by the configuration.
///
/// An empty `connection` for the RocksDB engine resolves to
/// `<data_dir>/noteapp.db`.
pub async fn create_storage_service(
    config: &NoteAppConfig,
) -> Result<Box<dyn NoteStore>, StorageError> {
    let mut surreal = config.storage.surrealdb.clone();

    if surreal.engine == SurrealDBEngine::RocksDB && surreal.connection.is_empty() {
        let path = config.storage.data_dir.join("noteapp.db");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Configuration(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        surreal.connection = path.to_string_lossy().into_owned();
    }

    shared_storage::create_shared_store(surreal).await
}

/// Create an in-memory store, mostly useful for tests.
pub async fn create_memory_store() -> Result<Box<dyn NoteStore>, StorageError> {
    shared_storage::create_shared_store(config::SurrealDBConfig {
        engine: SurrealDBEngine::Memory,
        ..Default::default()
    })
    .await
}
