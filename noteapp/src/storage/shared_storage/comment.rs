//! Comment storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, record_key};
use crate::models::Comment;
use crate::storage::errors::StorageError;
use crate::storage::traits::CommentStore;

/// Internal representation of a Comment record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealComment {
    id: RecordId,
    post_id: String,
    user_id: String,
    username: String,
    content: String,
    created_at: DateTime<Utc>,
}

/// Struct for creating comments (timestamp handled by SurrealDB)
#[derive(Debug, Clone, serde::Serialize)]
struct CreateComment {
    post_id: String,
    user_id: String,
    username: String,
    content: String,
}

impl From<SurrealComment> for Comment {
    fn from(surreal_comment: SurrealComment) -> Self {
        Self {
            id: record_key(&surreal_comment.id),
            post_id: surreal_comment.post_id,
            user_id: surreal_comment.user_id,
            username: surreal_comment.username,
            content: surreal_comment.content,
            created_at: surreal_comment.created_at,
        }
    }
}

impl<C> SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Run a comment query with a single `$value` binding
    async fn query_comments(
        &self,
        query: &'static str,
        value: &str,
    ) -> Result<Vec<SurrealComment>, StorageError> {
        let mut result = self
            .client
            .query(query)
            .bind(("value", value.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to query comments: {}", e)))?;

        result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract comments: {}", e)))
    }
}

#[async_trait]
impl<C> CommentStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_comment(&self, comment: Comment) -> Result<Comment, StorageError> {
        let create_comment = CreateComment {
            post_id: comment.post_id,
            user_id: comment.user_id,
            username: comment.username,
            content: comment.content,
        };

        let created: Option<SurrealComment> = self
            .client
            .create(("comment", comment.id.as_str()))
            .content(create_comment)
            .await
            .map_err(|e| StorageError::from_write(e, "Failed to create comment"))?;

        created
            .map(Comment::from)
            .ok_or_else(|| StorageError::Internal("No comment created".to_string()))
    }

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>, StorageError> {
        let comment: Option<SurrealComment> = self
            .client
            .select(("comment", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get comment: {}", e)))?;

        Ok(comment.map(Comment::from))
    }

    async fn update_comment(&self, comment: Comment) -> Result<Comment, StorageError> {
        let mut result = self
            .client
            .query("UPDATE $id SET content = $content")
            .bind(("id", RecordId::from(("comment", comment.id.as_str()))))
            .bind(("content", comment.content.clone()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update comment: {}", e)))?;

        let updated: Vec<SurrealComment> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract updated comment: {}", e)))?;

        updated
            .into_iter()
            .next()
            .map(Comment::from)
            .ok_or_else(|| {
                StorageError::NotFound(format!("Comment with id {} not found", comment.id))
            })
    }

    async fn delete_comment(&self, id: &str) -> Result<bool, StorageError> {
        let deleted: Option<SurrealComment> = self
            .client
            .delete(("comment", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete comment: {}", e)))?;

        Ok(deleted.is_some())
    }

    async fn list_comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>, StorageError> {
        let comments = self
            .query_comments(
                "SELECT * FROM comment WHERE post_id = $value ORDER BY created_at ASC",
                post_id,
            )
            .await?;

        Ok(comments.into_iter().map(Comment::from).collect())
    }

    async fn list_comments_by_user(&self, user_id: &str) -> Result<Vec<Comment>, StorageError> {
        let comments = self
            .query_comments(
                "SELECT * FROM comment WHERE user_id = $value ORDER BY created_at ASC",
                user_id,
            )
            .await?;

        Ok(comments.into_iter().map(Comment::from).collect())
    }

    async fn delete_comments_for_post(&self, post_id: &str) -> Result<usize, StorageError> {
        let deleted = self
            .query_comments("DELETE comment WHERE post_id = $value RETURN BEFORE", post_id)
            .await?;

        Ok(deleted.len())
    }

    async fn delete_comments_by_user(&self, user_id: &str) -> Result<usize, StorageError> {
        let deleted = self
            .query_comments("DELETE comment WHERE user_id = $value RETURN BEFORE", user_id)
            .await?;

        Ok(deleted.len())
    }
}
