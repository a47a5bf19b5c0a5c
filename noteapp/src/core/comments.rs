//! Comments on posts

use std::sync::Arc;

use super::actor::Actor;
use super::posts::validate_body;
use crate::config::PostsConfig;
use crate::models::Comment;
use crate::storage::traits::NoteStore;
use crate::{NoteAppError, Result};

#[derive(Debug, Clone)]
pub struct CommentService {
    store: Arc<dyn NoteStore>,
    config: PostsConfig,
}

impl CommentService {
    pub fn new(store: Arc<dyn NoteStore>, config: PostsConfig) -> Self {
        Self { store, config }
    }

    /// Comment on an existing post
    pub async fn add_comment(&self, actor: &Actor, post_id: &str, content: &str) -> Result<Comment> {
        let identity = actor.live_identity(self.store.as_ref()).await?;
        let content = validate_body(content, self.config.max_content_length, "Comment")?;

        if self.store.get_post(post_id).await?.is_none() {
            return Err(NoteAppError::not_found("post", post_id));
        }

        let comment = Comment::new(post_id, &identity.id, &identity.username, content);
        let created = self.store.create_comment(comment).await?;

        tracing::info!(comment_id = %created.id, post_id, "Comment added");
        Ok(created)
    }

    pub async fn get_comment(&self, id: &str) -> Result<Comment> {
        self.store
            .get_comment(id)
            .await?
            .ok_or_else(|| NoteAppError::not_found("comment", id))
    }

    /// Comments on a post, oldest first
    pub async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        Ok(self.store.list_comments_for_post(post_id).await?)
    }

    pub async fn update_comment(&self, actor: &Actor, id: &str, content: &str) -> Result<Comment> {
        let identity = actor.identity()?;
        let mut comment = self.get_comment(id).await?;
        identity.ensure_owns(&comment.user_id, "comment", "edit")?;

        comment.content = validate_body(content, self.config.max_content_length, "Comment")?;
        Ok(self.store.update_comment(comment).await?)
    }

    pub async fn delete_comment(&self, actor: &Actor, id: &str) -> Result<()> {
        let identity = actor.identity()?;
        let comment = self.get_comment(id).await?;
        identity.ensure_owns(&comment.user_id, "comment", "delete")?;

        self.store.delete_comment(&comment.id).await?;
        tracing::info!(comment_id = %comment.id, "Comment deleted");
        Ok(())
    }
}
