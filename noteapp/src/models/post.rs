//! Posts, comments and profile views

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// An image attached to a post, kept inline in the post record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostImage {
    /// MIME type, e.g. `image/png`
    pub content_type: String,

    /// Base64-encoded image bytes
    pub data: String,
}

impl PostImage {
    pub fn from_bytes(content_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            content_type: content_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Render as a `data:` URL suitable for an `<img src>`
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.data)
    }
}

/// Raw image as received from a client, before validation.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A user post, newest first in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub image: Option<PostImage>,
    pub created_at: DateTime<Utc>,

    /// Comments in creation order; only populated by read operations
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            username: username.into(),
            content: content.into(),
            image: None,
            created_at: Utc::now(),
            comments: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: Option<PostImage>) -> Self {
        self.image = image;
        self
    }
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        post_id: impl Into<String>,
        user_id: impl Into<String>,
        username: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            post_id: post_id.into(),
            user_id: user_id.into(),
            username: username.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A user together with their posts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user: User,
    pub posts: Vec<Post>,
}
