//! Shared Storage
//!
//! SurrealDB implementation of the NoteApp storage traits. The same code runs
//! against the in-memory engine and embedded RocksDB.

use surrealdb::Surreal;

use crate::storage::config::{SurrealDBConfig, SurrealDBEngine};
use crate::storage::errors::StorageError;
use crate::storage::traits::NoteStore;

pub mod base;
pub mod comment;
pub mod config;
pub mod friendship;
pub mod post;
pub mod schema;
pub mod user;

pub use base::*;
pub use config::*;

/// Type alias for embedded shared storage
pub type EmbeddedSharedStorage = SharedStorage<surrealdb::engine::local::Db>;

/// Create an in-memory shared storage instance
pub async fn create_memory_shared_storage(
    config: SharedStorageConfig,
) -> Result<EmbeddedSharedStorage, StorageError> {
    let client = Surreal::new::<surrealdb::engine::local::Mem>(())
        .await
        .map_err(|e| StorageError::Connection(format!("Failed to create memory client: {}", e)))?;

    SharedStorage::new(client, config).await
}

/// Create an embedded shared storage instance
#[cfg(feature = "surrealdb-embedded")]
pub async fn create_embedded_shared_storage(
    path: &str,
    config: SharedStorageConfig,
) -> Result<EmbeddedSharedStorage, StorageError> {
    use surrealdb::engine::local::RocksDb;

    let client = Surreal::new::<RocksDb>(path).await.map_err(|e| {
        StorageError::Connection(format!("Failed to create embedded database: {}", e))
    })?;

    SharedStorage::new(client, config).await
}

/// Create a shared storage instance from configuration
pub async fn create_shared_store(
    config: SurrealDBConfig,
) -> Result<Box<dyn NoteStore>, StorageError> {
    let shared_config = SharedStorageConfig {
        namespace: config.namespace.clone(),
        database: config.database.clone(),
        engine: config.engine,
    };

    match config.engine {
        SurrealDBEngine::Memory => {
            tracing::info!("Creating SharedStorage in-memory store");
            let store = create_memory_shared_storage(shared_config).await?;
            Ok(Box::new(store))
        }
        #[cfg(feature = "surrealdb-embedded")]
        SurrealDBEngine::RocksDB => {
            tracing::info!(
                "Creating SharedStorage RocksDB store at {}",
                config.connection
            );
            let store = create_embedded_shared_storage(&config.connection, shared_config).await?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "surrealdb-embedded"))]
        SurrealDBEngine::RocksDB => Err(StorageError::Configuration(
            "RocksDB engine requires 'surrealdb-embedded' feature to be enabled".to_string(),
        )),
    }
}

