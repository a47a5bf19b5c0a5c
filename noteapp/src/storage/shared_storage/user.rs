//! User storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{CountRow, SharedStorage, paginate, record_key};
use crate::models::User;
use crate::storage::errors::StorageError;
use crate::storage::traits::UserStore;

/// Internal representation of a User record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealUser {
    id: RecordId,
    username: String,
    email: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Struct for creating users (timestamps handled by SurrealDB)
#[derive(Debug, Clone, serde::Serialize)]
struct CreateUser {
    username: String,
    email: Option<String>,
    password_hash: String,
}

impl From<SurrealUser> for User {
    fn from(surreal_user: SurrealUser) -> Self {
        Self {
            id: record_key(&surreal_user.id),
            username: surreal_user.username,
            email: surreal_user.email,
            password_hash: surreal_user.password_hash,
            created_at: surreal_user.created_at,
            updated_at: surreal_user.updated_at,
        }
    }
}

#[async_trait]
impl<C> UserStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_user(&self, user: User) -> Result<User, StorageError> {
        let create_user = CreateUser {
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        };

        let created: Option<SurrealUser> = self
            .client
            .create(("user", user.id.as_str()))
            .content(create_user)
            .await
            .map_err(|e| StorageError::from_write(e, "Failed to create user"))?;

        created
            .map(User::from)
            .ok_or_else(|| StorageError::Internal("No user created".to_string()))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        let user: Option<SurrealUser> = self
            .client
            .select(("user", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get user: {}", e)))?;

        Ok(user.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let mut result = self
            .client
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to query user: {}", e)))?;

        let users: Vec<SurrealUser> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract user: {}", e)))?;

        Ok(users.into_iter().next().map(User::from))
    }

    async fn update_user(&self, user: User) -> Result<User, StorageError> {
        let query = r#"
            UPDATE $id SET
                username = $username,
                email = $email,
                password_hash = $password_hash
        "#;

        let mut result = self
            .client
            .query(query)
            .bind(("id", RecordId::from(("user", user.id.as_str()))))
            .bind(("username", user.username.clone()))
            .bind(("email", user.email.clone()))
            .bind(("password_hash", user.password_hash.clone()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update user: {}", e)))?;

        let updated: Vec<SurrealUser> = result
            .take(0)
            .map_err(|e| StorageError::from_write(e, "Failed to update user"))?;

        updated
            .into_iter()
            .next()
            .map(User::from)
            .ok_or_else(|| StorageError::NotFound(format!("User with id {} not found", user.id)))
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StorageError> {
        let deleted: Option<SurrealUser> = self
            .client
            .delete(("user", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete user: {}", e)))?;

        Ok(deleted.is_some())
    }

    async fn list_users(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<User>, StorageError> {
        let mut query = String::from("SELECT * FROM user ORDER BY username ASC");
        paginate(&mut query, limit, offset);

        let mut result = self
            .client
            .query(&query)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list users: {}", e)))?;

        let users: Vec<SurrealUser> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract users: {}", e)))?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn search_users(&self, needle: &str, limit: usize) -> Result<Vec<User>, StorageError> {
        let query = format!(
            r#"
            SELECT * FROM user
            WHERE string::contains(string::lowercase(username), $needle)
                OR string::contains(string::lowercase(email ?? ''), $needle)
            ORDER BY username ASC
            LIMIT {}
            "#,
            limit
        );

        let mut result = self
            .client
            .query(&query)
            .bind(("needle", needle.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to search users: {}", e)))?;

        let users: Vec<SurrealUser> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract users: {}", e)))?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn count_users(&self) -> Result<usize, StorageError> {
        let mut result = self
            .client
            .query("SELECT count() AS count FROM user GROUP ALL")
            .await
            .map_err(|e| StorageError::Query(format!("Failed to count users: {}", e)))?;

        let counts: Vec<CountRow> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract user count: {}", e)))?;

        Ok(counts.first().map_or(0, |row| row.count as usize))
    }
}
