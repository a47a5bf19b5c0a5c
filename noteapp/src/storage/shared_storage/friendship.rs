//! Friendship storage implementation
//!
//! Each ordered pair maps to a single record keyed by
//! [`Friendship::key_for`], so a second insert of the same pair collides on
//! the record id. The `friendship_pair_idx` unique index backs this up.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::SharedStorage;
use crate::models::Friendship;
use crate::storage::errors::StorageError;
use crate::storage::traits::FriendshipStore;

/// Internal representation of a Friendship record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealFriendship {
    id: RecordId,
    user_id: String,
    friend_id: String,
    created_at: DateTime<Utc>,
}

/// Struct for creating friendships (timestamp handled by SurrealDB)
#[derive(Debug, Clone, serde::Serialize)]
struct CreateFriendship {
    user_id: String,
    friend_id: String,
}

impl From<SurrealFriendship> for Friendship {
    fn from(surreal_friendship: SurrealFriendship) -> Self {
        Self {
            user_id: surreal_friendship.user_id,
            friend_id: surreal_friendship.friend_id,
            created_at: surreal_friendship.created_at,
        }
    }
}

#[async_trait]
impl<C> FriendshipStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_friendship(&self, friendship: Friendship) -> Result<Friendship, StorageError> {
        let key = friendship.key();
        let create_friendship = CreateFriendship {
            user_id: friendship.user_id,
            friend_id: friendship.friend_id,
        };

        let created: Option<SurrealFriendship> = self
            .client
            .create(("friendship", key.as_str()))
            .content(create_friendship)
            .await
            .map_err(|e| StorageError::from_write(e, "Failed to create friendship"))?;

        created
            .map(Friendship::from)
            .ok_or_else(|| StorageError::Internal("No friendship created".to_string()))
    }

    async fn get_friendship(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<Friendship>, StorageError> {
        let key = Friendship::key_for(user_id, friend_id);
        let friendship: Option<SurrealFriendship> = self
            .client
            .select(("friendship", key.as_str()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get friendship: {}", e)))?;

        Ok(friendship.map(Friendship::from))
    }

    async fn delete_friendship(&self, user_id: &str, friend_id: &str) -> Result<bool, StorageError> {
        let key = Friendship::key_for(user_id, friend_id);
        let deleted: Option<SurrealFriendship> = self
            .client
            .delete(("friendship", key.as_str()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete friendship: {}", e)))?;

        Ok(deleted.is_some())
    }

    async fn list_friendships_for_user(&self, user_id: &str) -> Result<Vec<Friendship>, StorageError> {
        let mut result = self
            .client
            .query("SELECT * FROM friendship WHERE user_id = $user_id ORDER BY created_at ASC")
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list friendships: {}", e)))?;

        let friendships: Vec<SurrealFriendship> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract friendships: {}", e)))?;

        Ok(friendships.into_iter().map(Friendship::from).collect())
    }

    async fn list_friendships_involving(
        &self,
        user_id: &str,
    ) -> Result<Vec<Friendship>, StorageError> {
        let query = r#"
            SELECT * FROM friendship
            WHERE user_id = $user_id OR friend_id = $user_id
            ORDER BY created_at ASC
        "#;

        let mut result = self
            .client
            .query(query)
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list friendships: {}", e)))?;

        let friendships: Vec<SurrealFriendship> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract friendships: {}", e)))?;

        Ok(friendships.into_iter().map(Friendship::from).collect())
    }

    async fn delete_friendships_involving(&self, user_id: &str) -> Result<usize, StorageError> {
        let query = r#"
            DELETE friendship
            WHERE user_id = $user_id OR friend_id = $user_id
            RETURN BEFORE
        "#;

        let mut result = self
            .client
            .query(query)
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete friendships: {}", e)))?;

        let deleted: Vec<SurrealFriendship> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract deleted friendships: {}", e)))?;

        tracing::debug!("Deleted {} friendships involving {}", deleted.len(), user_id);
        Ok(deleted.len())
    }
}
