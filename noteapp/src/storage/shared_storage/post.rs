//! Post storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{CountRow, SharedStorage, paginate, record_key};
use crate::models::{Post, PostImage};
use crate::storage::errors::StorageError;
use crate::storage::filters::PostFilter;
use crate::storage::traits::PostStore;

/// Internal representation of a Post record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealPost {
    id: RecordId,
    user_id: String,
    username: String,
    content: String,
    #[serde(default)]
    image_content_type: Option<String>,
    #[serde(default)]
    image_data: Option<String>,
    created_at: DateTime<Utc>,
}

/// Struct for creating posts (timestamp handled by SurrealDB)
#[derive(Debug, Clone, serde::Serialize)]
struct CreatePost {
    user_id: String,
    username: String,
    content: String,
    image_content_type: Option<String>,
    image_data: Option<String>,
}

impl From<SurrealPost> for Post {
    fn from(surreal_post: SurrealPost) -> Self {
        let image = match (surreal_post.image_content_type, surreal_post.image_data) {
            (Some(content_type), Some(data)) => Some(PostImage { content_type, data }),
            _ => None,
        };

        Self {
            id: record_key(&surreal_post.id),
            user_id: surreal_post.user_id,
            username: surreal_post.username,
            content: surreal_post.content,
            image,
            created_at: surreal_post.created_at,
            comments: Vec::new(),
        }
    }
}

/// Build the WHERE clause for a post filter
fn build_post_filter(filter: &PostFilter) -> String {
    let mut conditions = Vec::new();
    if filter.user_id.is_some() {
        conditions.push("user_id = $user_id");
    }
    if filter.created_after.is_some() {
        conditions.push("created_at > <datetime> $created_after");
    }
    if filter.created_before.is_some() {
        conditions.push("created_at < <datetime> $created_before");
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

impl<C> SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Run a post query, binding whichever filter values are present
    async fn query_posts<T>(&self, query: &str, filter: &PostFilter) -> Result<Vec<T>, StorageError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut request = self.client.query(query);
        if let Some(user_id) = &filter.user_id {
            request = request.bind(("user_id", user_id.clone()));
        }
        if let Some(after) = filter.created_after {
            request = request.bind(("created_after", after.to_rfc3339()));
        }
        if let Some(before) = filter.created_before {
            request = request.bind(("created_before", before.to_rfc3339()));
        }

        let mut result = request
            .await
            .map_err(|e| StorageError::Query(format!("Failed to query posts: {}", e)))?;

        result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract posts: {}", e)))
    }
}

#[async_trait]
impl<C> PostStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_post(&self, post: Post) -> Result<Post, StorageError> {
        let (image_content_type, image_data) = match post.image {
            Some(image) => (Some(image.content_type), Some(image.data)),
            None => (None, None),
        };

        let create_post = CreatePost {
            user_id: post.user_id,
            username: post.username,
            content: post.content,
            image_content_type,
            image_data,
        };

        let created: Option<SurrealPost> = self
            .client
            .create(("post", post.id.as_str()))
            .content(create_post)
            .await
            .map_err(|e| StorageError::from_write(e, "Failed to create post"))?;

        created
            .map(Post::from)
            .ok_or_else(|| StorageError::Internal("No post created".to_string()))
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, StorageError> {
        let post: Option<SurrealPost> = self
            .client
            .select(("post", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get post: {}", e)))?;

        Ok(post.map(Post::from))
    }

    async fn update_post(&self, post: Post) -> Result<Post, StorageError> {
        let (image_content_type, image_data) = match &post.image {
            Some(image) => (Some(image.content_type.clone()), Some(image.data.clone())),
            None => (None, None),
        };

        let query = r#"
            UPDATE $id SET
                content = $content,
                image_content_type = $image_content_type,
                image_data = $image_data
        "#;

        let mut result = self
            .client
            .query(query)
            .bind(("id", RecordId::from(("post", post.id.as_str()))))
            .bind(("content", post.content.clone()))
            .bind(("image_content_type", image_content_type))
            .bind(("image_data", image_data))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update post: {}", e)))?;

        let updated: Vec<SurrealPost> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract updated post: {}", e)))?;

        updated
            .into_iter()
            .next()
            .map(Post::from)
            .ok_or_else(|| StorageError::NotFound(format!("Post with id {} not found", post.id)))
    }

    async fn delete_post(&self, id: &str) -> Result<bool, StorageError> {
        let deleted: Option<SurrealPost> = self
            .client
            .delete(("post", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete post: {}", e)))?;

        Ok(deleted.is_some())
    }

    async fn list_posts(
        &self,
        filter: Option<PostFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, StorageError> {
        let filter = filter.unwrap_or_default();
        let mut query = format!(
            "SELECT * FROM post{} ORDER BY created_at DESC",
            build_post_filter(&filter)
        );
        paginate(&mut query, limit, offset);

        let posts: Vec<SurrealPost> = self.query_posts(&query, &filter).await?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    async fn count_posts(&self, filter: Option<PostFilter>) -> Result<usize, StorageError> {
        let filter = filter.unwrap_or_default();
        let query = format!(
            "SELECT count() AS count FROM post{} GROUP ALL",
            build_post_filter(&filter)
        );

        let counts: Vec<CountRow> = self.query_posts(&query, &filter).await?;
        Ok(counts.first().map_or(0, |row| row.count as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        assert_eq!(build_post_filter(&PostFilter::default()), "");
    }

    #[test]
    fn test_filter_joins_conditions() {
        let filter = PostFilter {
            user_id: Some("alice".to_string()),
            created_after: Some(Utc::now()),
            created_before: None,
        };
        assert_eq!(
            build_post_filter(&filter),
            " WHERE user_id = $user_id AND created_at > <datetime> $created_after"
        );
    }
}
