//! Configuration for shared storage

use crate::storage::config::SurrealDBEngine;

/// Configuration for the shared storage
#[derive(Debug, Clone)]
pub struct SharedStorageConfig {
    pub namespace: String,
    pub database: String,
    pub engine: SurrealDBEngine,
}

impl Default for SharedStorageConfig {
    fn default() -> Self {
        Self {
            namespace: "noteapp".to_string(),
            database: "main".to_string(),
            engine: SurrealDBEngine::Memory,
        }
    }
}
