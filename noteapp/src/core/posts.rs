//! Posts and their images

use std::sync::Arc;

use super::actor::Actor;
use crate::config::PostsConfig;
use crate::models::{ImageUpload, Post, PostImage};
use crate::storage::filters::PostFilter;
use crate::storage::traits::NoteStore;
use crate::{NoteAppError, Result};

/// Input for [`PostService::create_post`]
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub content: String,
    pub image: Option<ImageUpload>,
}

/// Input for [`PostService::update_post`]. A `None` image keeps the current one.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub content: String,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone)]
pub struct PostService {
    store: Arc<dyn NoteStore>,
    config: PostsConfig,
}

impl PostService {
    pub fn new(store: Arc<dyn NoteStore>, config: PostsConfig) -> Self {
        Self { store, config }
    }

    /// All posts, newest first, each with its comments
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let posts = self.store.list_posts(None, None, None).await?;
        self.with_comments(posts).await
    }

    /// A single post with its comments
    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let mut post = self.find(id).await?;
        post.comments = self.store.list_comments_for_post(&post.id).await?;
        Ok(post)
    }

    /// Posts written by `user_id`, newest first, each with its comments
    pub async fn posts_by_user(&self, user_id: &str) -> Result<Vec<Post>> {
        let posts = self
            .store
            .list_posts(Some(PostFilter::by_user(user_id)), None, None)
            .await?;
        self.with_comments(posts).await
    }

    pub async fn create_post(&self, actor: &Actor, new_post: NewPost) -> Result<Post> {
        let identity = actor.live_identity(self.store.as_ref()).await?;
        let content = self.validate_content(&new_post.content)?;
        let image = self.validate_image(new_post.image)?;

        let post = Post::new(&identity.id, &identity.username, content).with_image(image);
        let created = self.store.create_post(post).await?;

        tracing::info!(post_id = %created.id, user_id = %identity.id, "Post created");
        Ok(created)
    }

    pub async fn update_post(&self, actor: &Actor, id: &str, update: PostUpdate) -> Result<Post> {
        let identity = actor.identity()?;
        let mut post = self.find(id).await?;
        identity.ensure_owns(&post.user_id, "post", "edit")?;

        post.content = self.validate_content(&update.content)?;
        if let Some(image) = self.validate_image(update.image)? {
            post.image = Some(image);
        }

        let mut updated = self.store.update_post(post).await?;
        updated.comments = self.store.list_comments_for_post(&updated.id).await?;

        tracing::info!(post_id = %updated.id, "Post updated");
        Ok(updated)
    }

    /// Delete a post together with its comments
    pub async fn delete_post(&self, actor: &Actor, id: &str) -> Result<()> {
        let identity = actor.identity()?;
        let post = self.find(id).await?;
        identity.ensure_owns(&post.user_id, "post", "delete")?;

        let comments = self.store.delete_comments_for_post(&post.id).await?;
        self.store.delete_post(&post.id).await?;

        tracing::info!(post_id = %post.id, comments, "Post deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Post> {
        self.store
            .get_post(id)
            .await?
            .ok_or_else(|| NoteAppError::not_found("post", id))
    }

    async fn with_comments(&self, mut posts: Vec<Post>) -> Result<Vec<Post>> {
        for post in &mut posts {
            post.comments = self.store.list_comments_for_post(&post.id).await?;
        }
        Ok(posts)
    }

    fn validate_content(&self, content: &str) -> Result<String> {
        validate_body(content, self.config.max_content_length, "Post")
    }

    /// Check type and size of an upload. Empty uploads count as no image.
    fn validate_image(&self, upload: Option<ImageUpload>) -> Result<Option<PostImage>> {
        let Some(upload) = upload else {
            return Ok(None);
        };
        if upload.bytes.is_empty() {
            return Ok(None);
        }

        let content_type = upload.content_type.to_lowercase();
        if !self
            .config
            .allowed_image_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&content_type))
        {
            return Err(NoteAppError::Validation(format!(
                "Unsupported image type '{}'",
                upload.content_type
            )));
        }

        if upload.bytes.len() > self.config.max_image_bytes {
            return Err(NoteAppError::Validation(format!(
                "Image is {} bytes; the limit is {} bytes",
                upload.bytes.len(),
                self.config.max_image_bytes
            )));
        }

        Ok(Some(PostImage::from_bytes(content_type, &upload.bytes)))
    }
}

/// Trim a post or comment body and check it is non-empty and within limits
pub(crate) fn validate_body(content: &str, max_length: usize, what: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(NoteAppError::Validation(format!("{} cannot be empty", what)));
    }
    if trimmed.chars().count() > max_length {
        return Err(NoteAppError::Validation(format!(
            "{} is longer than {} characters",
            what, max_length
        )));
    }
    Ok(trimmed.to_string())
}
