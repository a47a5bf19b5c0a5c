//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::storage::config::SurrealDBEngine;
use std::path::Path;

/// Builder for creating NoteAppConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: NoteAppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: NoteAppConfig::default(),
        }
    }

    /// Set the base data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Keep everything in memory; nothing survives a restart.
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.surrealdb.engine = SurrealDBEngine::Memory;
        self.config.storage.surrealdb.connection = String::new();
        self
    }

    /// Use embedded RocksDB at `path`.
    pub fn with_rocksdb_storage<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.surrealdb.engine = SurrealDBEngine::RocksDB;
        self.config.storage.surrealdb.connection = path.as_ref().to_string_lossy().into_owned();
        self
    }

    /// Set SurrealDB namespace and database.
    pub fn with_database(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.config.storage.surrealdb.namespace = namespace.into();
        self.config.storage.surrealdb.database = database.into();
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Whether the caller shows up in their own user search results.
    pub fn with_self_in_search(mut self, include: bool) -> Self {
        self.config.friends.exclude_self_from_search = !include;
        self
    }

    /// Set the largest accepted image upload.
    pub fn with_max_image_bytes(mut self, bytes: usize) -> Self {
        self.config.posts.max_image_bytes = bytes;
        self
    }

    /// Set the account deletion policy.
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.config.users.delete_policy = policy;
        self
    }

    /// Create a configuration for development with an in-memory database.
    pub fn development() -> Self {
        Self::new()
            .with_memory_storage()
            .with_log_level(LogLevel::Debug)
    }

    /// Create a configuration for automated tests.
    pub fn testing() -> Self {
        Self::development().with_log_level(LogLevel::Warn)
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<NoteAppConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
