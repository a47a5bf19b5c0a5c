//! Base shared storage implementation

use async_trait::async_trait;
use surrealdb::{Connection, RecordId, Surreal};

use super::config::SharedStorageConfig;
use crate::storage::config::SurrealDBEngine;
use crate::storage::errors::StorageError;
use crate::storage::traits::{BaseStore, NoteStore};

/// SurrealDB-backed store implementing every NoteApp storage trait
#[derive(Debug)]
pub struct SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub(crate) client: Surreal<C>,
    pub(crate) config: SharedStorageConfig,
}

impl<C> SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Create a new shared storage instance
    pub async fn new(
        client: Surreal<C>,
        config: SharedStorageConfig,
    ) -> Result<Self, StorageError> {
        // Set namespace and database
        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Failed to set namespace/database: {}", e))
            })?;

        let storage = Self { client, config };

        storage.initialize_schema().await?;

        Ok(storage)
    }

    /// Initialize the database schema with all required tables
    async fn initialize_schema(&self) -> Result<(), StorageError> {
        super::schema::initialize_schema(&self.client).await
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Surreal<C> {
        &self.client
    }
}

/// Plain key of a record id.
///
/// `RecordId::key().to_string()` escapes non-trivial keys such as UUIDs.
/// Depending on the SurrealDB release the escape is `⟨...⟩` or a pair of
/// backticks; the models carry the bare key.
pub(crate) fn record_key(id: &RecordId) -> String {
    unescape_key(&id.key().to_string())
}

fn unescape_key(key: &str) -> String {
    let (inner, close) = if let Some(inner) = key.strip_prefix('⟨').and_then(|k| k.strip_suffix('⟩')) {
        (inner, '⟩')
    } else if let Some(inner) = key.strip_prefix('`').and_then(|k| k.strip_suffix('`')) {
        (inner, '`')
    } else {
        return key.to_string();
    };

    let mut plain = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) if next == close || next == '\\' => plain.push(next),
                Some(next) => {
                    plain.push(c);
                    plain.push(next);
                }
                None => plain.push(c),
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

/// Row shape of `SELECT count() AS count ... GROUP ALL`
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub count: u64,
}

/// Append `LIMIT`/`START` clauses to a query
pub(crate) fn paginate(query: &mut String, limit: Option<usize>, offset: Option<usize>) {
    if let Some(limit) = limit {
        query.push_str(&format!(" LIMIT {}", limit));
    }
    if let Some(offset) = offset {
        query.push_str(&format!(" START {}", offset));
    }
}

#[async_trait]
impl<C> BaseStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn health_check(&self) -> Result<bool, StorageError> {
        let _result = self
            .client
            .query("INFO FOR DB")
            .await
            .map_err(|e| StorageError::Connection(format!("Health check failed: {}", e)))?;

        Ok(true)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let queries = [
            "DELETE FROM comment",
            "DELETE FROM post",
            "DELETE FROM friendship",
            "DELETE FROM user",
        ];

        for query in queries {
            self.client
                .query(query)
                .await
                .map_err(|e| StorageError::Query(format!("Failed to clear table: {}", e)))?;
        }

        Ok(())
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError> {
        let engine = match self.config.engine {
            SurrealDBEngine::Memory => "surrealdb_memory",
            SurrealDBEngine::RocksDB => "surrealdb_rocksdb",
        };

        Ok(serde_json::json!({
            "type": "shared_storage",
            "namespace": self.config.namespace,
            "database": self.config.database,
            "engine": engine,
            "tables": ["user", "friendship", "post", "comment"],
        }))
    }

    async fn close(&self) -> Result<(), StorageError> {
        // SurrealDB connections are automatically closed when dropped
        Ok(())
    }
}

impl<C> NoteStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_strips_escapes() {
        let uuid = "92d16d4a-0d8c-4a55-9a3e-1f0c2b7f5e11";
        assert_eq!(record_key(&RecordId::from(("user", uuid))), uuid);
        assert_eq!(record_key(&RecordId::from(("user", "alice"))), "alice");
        assert_eq!(record_key(&RecordId::from(("friendship", "a|b"))), "a|b");
    }

    #[test]
    fn test_unescape_both_forms() {
        assert_eq!(unescape_key("⟨abc-def⟩"), "abc-def");
        assert_eq!(unescape_key("`abc-def`"), "abc-def");
        assert_eq!(unescape_key("`a\\`b`"), "a`b");
        assert_eq!(unescape_key("⟨a\\⟩b⟩"), "a⟩b");
        assert_eq!(unescape_key("plain"), "plain");
    }
}
