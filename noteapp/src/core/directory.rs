//! User lookup used by the friend service

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::models::User;
use crate::storage::traits::NoteStore;
use crate::Result;

/// Resolves user identifiers and searches users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync + Debug {
    /// Look up a user by id
    async fn find_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Up to `limit` users whose username or email contains `query`,
    /// ignoring case. An empty or whitespace-only query matches nobody.
    async fn search_users(&self, query: &str, limit: usize) -> Result<Vec<User>>;
}

/// [`UserDirectory`] backed by the store's user table.
#[derive(Debug, Clone)]
pub struct StoreUserDirectory {
    store: Arc<dyn NoteStore>,
}

impl StoreUserDirectory {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserDirectory for StoreUserDirectory {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.store.get_user(user_id).await?)
    }

    async fn search_users(&self, query: &str, limit: usize) -> Result<Vec<User>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        Ok(self.store.search_users(&needle, limit).await?)
    }
}
