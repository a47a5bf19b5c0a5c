//! Trait definitions for storage components in NoteApp

use std::any::Any;
use std::fmt::Debug;
use async_trait::async_trait;

use crate::models::{Comment, Friendship, Post, User};
use crate::storage::errors::StorageError;
use crate::storage::filters::PostFilter;

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> std::result::Result<bool, StorageError>;

    /// Clear all data in the store
    async fn clear(&self) -> std::result::Result<(), StorageError>;

    /// Get metadata about the store
    async fn get_metadata(&self) -> std::result::Result<serde_json::Value, StorageError>;

    /// Close connections and release resources
    async fn close(&self) -> std::result::Result<(), StorageError>;
}

/// Trait for user account operations
#[async_trait]
pub trait UserStore: BaseStore {
    /// Create a new user. Fails with `AlreadyExists` when the username is taken.
    async fn create_user(&self, user: User) -> std::result::Result<User, StorageError>;

    /// Get a user by ID
    async fn get_user(&self, id: &str) -> std::result::Result<Option<User>, StorageError>;

    /// Get a user by exact username
    async fn get_user_by_username(&self, username: &str) -> std::result::Result<Option<User>, StorageError>;

    /// Update username, email and password hash of an existing user
    async fn update_user(&self, user: User) -> std::result::Result<User, StorageError>;

    /// Delete a user by ID
    async fn delete_user(&self, id: &str) -> std::result::Result<bool, StorageError>;

    /// List users ordered by username
    async fn list_users(&self, limit: Option<usize>, offset: Option<usize>)
        -> std::result::Result<Vec<User>, StorageError>;

    /// Users whose username or email contains `needle`, ignoring case,
    /// ordered by username. `needle` is matched as given and must be lowercase.
    async fn search_users(&self, needle: &str, limit: usize)
        -> std::result::Result<Vec<User>, StorageError>;

    /// Count all users
    async fn count_users(&self) -> std::result::Result<usize, StorageError>;
}

/// Trait for directed friend links
#[async_trait]
pub trait FriendshipStore: BaseStore {
    /// Insert a friend link. A second insert of the same ordered pair fails
    /// with `AlreadyExists`, including under concurrent calls.
    async fn create_friendship(&self, friendship: Friendship) -> std::result::Result<Friendship, StorageError>;

    /// Get the link for an ordered pair
    async fn get_friendship(&self, user_id: &str, friend_id: &str)
        -> std::result::Result<Option<Friendship>, StorageError>;

    /// Delete the link for an ordered pair, returning whether a record was removed
    async fn delete_friendship(&self, user_id: &str, friend_id: &str) -> std::result::Result<bool, StorageError>;

    /// Links owned by `user_id`, in insertion order
    async fn list_friendships_for_user(&self, user_id: &str) -> std::result::Result<Vec<Friendship>, StorageError>;

    /// Links where `user_id` is either the owner or the target
    async fn list_friendships_involving(&self, user_id: &str) -> std::result::Result<Vec<Friendship>, StorageError>;

    /// Delete every link where `user_id` is either the owner or the target
    async fn delete_friendships_involving(&self, user_id: &str) -> std::result::Result<usize, StorageError>;
}

/// Trait for post operations
#[async_trait]
pub trait PostStore: BaseStore {
    /// Create a new post
    async fn create_post(&self, post: Post) -> std::result::Result<Post, StorageError>;

    /// Get a post by its ID. Comments are not populated.
    async fn get_post(&self, id: &str) -> std::result::Result<Option<Post>, StorageError>;

    /// Update content and image of an existing post
    async fn update_post(&self, post: Post) -> std::result::Result<Post, StorageError>;

    /// Delete a post by its ID
    async fn delete_post(&self, id: &str) -> std::result::Result<bool, StorageError>;

    /// List posts newest first with optional filtering
    async fn list_posts(&self, filter: Option<PostFilter>, limit: Option<usize>, offset: Option<usize>)
        -> std::result::Result<Vec<Post>, StorageError>;

    /// Count posts with optional filtering
    async fn count_posts(&self, filter: Option<PostFilter>) -> std::result::Result<usize, StorageError>;
}

/// Trait for comment operations
#[async_trait]
pub trait CommentStore: BaseStore {
    /// Create a new comment
    async fn create_comment(&self, comment: Comment) -> std::result::Result<Comment, StorageError>;

    /// Get a comment by its ID
    async fn get_comment(&self, id: &str) -> std::result::Result<Option<Comment>, StorageError>;

    /// Update the content of an existing comment
    async fn update_comment(&self, comment: Comment) -> std::result::Result<Comment, StorageError>;

    /// Delete a comment by its ID
    async fn delete_comment(&self, id: &str) -> std::result::Result<bool, StorageError>;

    /// Comments on a post, oldest first
    async fn list_comments_for_post(&self, post_id: &str) -> std::result::Result<Vec<Comment>, StorageError>;

    /// Comments written by a user, oldest first
    async fn list_comments_by_user(&self, user_id: &str) -> std::result::Result<Vec<Comment>, StorageError>;

    /// Delete every comment on a post
    async fn delete_comments_for_post(&self, post_id: &str) -> std::result::Result<usize, StorageError>;

    /// Delete every comment written by a user
    async fn delete_comments_by_user(&self, user_id: &str) -> std::result::Result<usize, StorageError>;
}

/// Combined store used by the services
#[async_trait]
pub trait NoteStore: UserStore + FriendshipStore + PostStore + CommentStore {
    /// Downcast support for backend-specific access
    fn as_any(&self) -> &dyn Any;
}
