//! Accounts and profiles
//!
//! Account deletion follows [`DeletePolicy`]: `restrict` refuses while the
//! user still appears in any friendship, post or comment; `cascade` removes
//! those first.

use std::sync::Arc;

use super::actor::Actor;
use crate::config::{DeletePolicy, UsersConfig};
use crate::models::{User, UserProfile};
use crate::storage::errors::StorageError;
use crate::storage::filters::PostFilter;
use crate::storage::traits::NoteStore;
use crate::{NoteAppError, Result};

#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<dyn NoteStore>,
    config: UsersConfig,
}

impl UserService {
    pub fn new(store: Arc<dyn NoteStore>, config: UsersConfig) -> Self {
        Self { store, config }
    }

    /// Store a new account. A taken username is a `Conflict`.
    pub async fn register(&self, user: User) -> Result<User> {
        let username = user.username.trim().to_string();
        if username.is_empty() {
            return Err(NoteAppError::Validation("Username cannot be empty".to_string()));
        }

        let user = User { username, ..user };
        match self.store.create_user(user).await {
            Ok(created) => {
                tracing::info!(user_id = %created.id, username = %created.username, "User registered");
                Ok(created)
            }
            Err(StorageError::AlreadyExists(_)) => Err(username_taken()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| NoteAppError::not_found("user", id))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.store.get_user_by_username(username).await?)
    }

    /// Persist changed username, email or password hash of an existing user
    pub async fn save(&self, user: User) -> Result<User> {
        let id = user.id.clone();
        match self.store.update_user(user).await {
            Ok(updated) => Ok(updated),
            Err(StorageError::AlreadyExists(_)) => Err(username_taken()),
            Err(StorageError::NotFound(_)) => Err(NoteAppError::not_found("user", id)),
            Err(e) => Err(e.into()),
        }
    }

    /// A user and their posts, newest first
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        let user = self.get_user(user_id).await?;
        let mut posts = self
            .store
            .list_posts(Some(PostFilter::by_user(user_id)), None, None)
            .await?;
        for post in &mut posts {
            post.comments = self.store.list_comments_for_post(&post.id).await?;
        }

        Ok(UserProfile { user, posts })
    }

    /// Delete an account according to the configured policy.
    ///
    /// Only the account owner may delete it.
    pub async fn delete_user(&self, actor: &Actor, user_id: &str) -> Result<()> {
        let identity = actor.identity()?;
        let user = self.get_user(user_id).await?;
        identity.ensure_owns(&user.id, "account", "delete")?;

        match self.config.delete_policy {
            DeletePolicy::Restrict => self.ensure_unreferenced(&user.id).await?,
            DeletePolicy::Cascade => self.remove_dependents(&user.id).await?,
        }

        self.store.delete_user(&user.id).await?;
        tracing::info!(user_id = %user.id, policy = %self.config.delete_policy, "User deleted");
        Ok(())
    }

    async fn ensure_unreferenced(&self, user_id: &str) -> Result<()> {
        let friendships = self.store.list_friendships_involving(user_id).await?.len();
        let posts = self
            .store
            .count_posts(Some(PostFilter::by_user(user_id)))
            .await?;
        let comments = self.store.list_comments_by_user(user_id).await?.len();

        if friendships + posts + comments > 0 {
            return Err(NoteAppError::Conflict(format!(
                "Account still has {} friendships, {} posts and {} comments",
                friendships, posts, comments
            )));
        }
        Ok(())
    }

    async fn remove_dependents(&self, user_id: &str) -> Result<()> {
        let friendships = self.store.delete_friendships_involving(user_id).await?;
        let comments = self.store.delete_comments_by_user(user_id).await?;

        let posts = self
            .store
            .list_posts(Some(PostFilter::by_user(user_id)), None, None)
            .await?;
        for post in &posts {
            self.store.delete_comments_for_post(&post.id).await?;
            self.store.delete_post(&post.id).await?;
        }

        tracing::debug!(
            user_id,
            friendships,
            comments,
            posts = posts.len(),
            "Removed account dependents"
        );
        Ok(())
    }
}

fn username_taken() -> NoteAppError {
    NoteAppError::Conflict("That username is already taken".to_string())
}
