//! Data Transfer Objects for the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use noteapp::models::{Comment, Post, User, UserProfile};

/// Public view of a user. The password hash is never included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Comment DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            username: comment.username,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// Post DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,

    /// `data:` URL of the attached image
    pub image_url: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Oldest first
    pub comments: Vec<CommentDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            image_url: post.image.as_ref().map(|image| image.data_url()),
            id: post.id,
            user_id: post.user_id,
            username: post.username,
            content: post.content,
            created_at: post.created_at,
            comments: post.comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

/// A user with their posts, newest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub user: UserDto,
    pub posts: Vec<PostDto>,
}

impl From<UserProfile> for ProfileDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: UserDto::from(profile.user),
            posts: profile.posts.into_iter().map(PostDto::from).collect(),
        }
    }
}

/// Body of the add and delete friend endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FriendRequest {
    pub friend_id: String,
}

/// Outcome of a friend list change
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FriendResponse {
    pub success: bool,
    pub message: String,

    /// The added friend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend: Option<UserDto>,
}

/// Query parameters for the friend list
#[derive(Debug, Deserialize, IntoParams)]
pub struct FriendListParams {
    /// Only friends whose username or email contains this text
    pub search_query: Option<String>,
}

/// Query parameters for user search
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Text to look for in usernames and emails
    #[serde(default)]
    pub query: String,
}

/// Request to add or edit a comment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub content: String,
}

/// Account settings update. Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub username: Option<String>,
    pub email: Option<String>,

    /// Required when `new_password` is set
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Result of an account settings update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub user: UserDto,

    /// Fresh token carrying the current username
    pub token: String,
    pub expires_at: i64,
}

/// Multipart form used to create or edit a post
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PostForm {
    /// Text of the post
    pub content: String,

    /// Optional image file
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}
