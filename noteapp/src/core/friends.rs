//! Friend list management
//!
//! Friendship is directional: `add_friend` creates a single link owned by the
//! caller, and "friends of A" are the links whose owner is A. The store keeps
//! at most one link per ordered pair. Losing a concurrent insert of the same
//! pair is reported as [`NoteAppError::Duplicate`].

use std::sync::Arc;

use super::actor::Actor;
use super::directory::UserDirectory;
use crate::config::FriendsConfig;
use crate::models::{Friendship, User};
use crate::storage::errors::StorageError;
use crate::storage::traits::NoteStore;
use crate::{NoteAppError, Result};

#[derive(Debug, Clone)]
pub struct FriendService {
    store: Arc<dyn NoteStore>,
    directory: Arc<dyn UserDirectory>,
    config: FriendsConfig,
}

impl FriendService {
    pub fn new(
        store: Arc<dyn NoteStore>,
        directory: Arc<dyn UserDirectory>,
        config: FriendsConfig,
    ) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    /// Links owned by the caller, oldest first
    pub async fn list_friends(&self, actor: &Actor) -> Result<Vec<Friendship>> {
        let identity = actor.identity()?;
        self.friendships_of(&identity.id).await
    }

    /// Links owned by `user_id`, oldest first. Unknown users have none.
    pub async fn friendships_of(&self, user_id: &str) -> Result<Vec<Friendship>> {
        Ok(self.store.list_friendships_for_user(user_id).await?)
    }

    /// The caller's friends resolved to users, optionally narrowed by the
    /// same case-insensitive match used for search.
    ///
    /// Links pointing at users that no longer exist are skipped.
    pub async fn list_friend_users(&self, actor: &Actor, search: Option<&str>) -> Result<Vec<User>> {
        let friendships = self.list_friends(actor).await?;
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut users = Vec::with_capacity(friendships.len());
        for friendship in friendships {
            match self.directory.find_user(&friendship.friend_id).await? {
                Some(user) => {
                    if needle.as_deref().is_none_or(|n| user.matches_query(n)) {
                        users.push(user);
                    }
                }
                None => tracing::debug!(
                    friend_id = %friendship.friend_id,
                    "Skipping friend link to missing user"
                ),
            }
        }

        Ok(users)
    }

    /// The link for an ordered pair, if present
    pub async fn find_friendship(&self, user_id: &str, friend_id: &str) -> Result<Option<Friendship>> {
        Ok(self.store.get_friendship(user_id, friend_id).await?)
    }

    /// Add `friend_id` to the caller's friend list.
    ///
    /// Errors, in the order they are checked: `NotAuthenticated` (also for a
    /// caller whose account is gone), `SelfReference`, `Duplicate`,
    /// `UnknownUser`.
    pub async fn add_friend(&self, actor: &Actor, friend_id: &str) -> Result<Friendship> {
        let identity = actor.live_identity(self.store.as_ref()).await?;
        let user_id = identity.id.as_str();

        if user_id == friend_id {
            return Err(NoteAppError::SelfReference);
        }

        if self.find_friendship(user_id, friend_id).await?.is_some() {
            return Err(duplicate(user_id, friend_id));
        }

        if self.directory.find_user(friend_id).await?.is_none() {
            return Err(NoteAppError::UnknownUser(friend_id.to_string()));
        }

        match self
            .store
            .create_friendship(Friendship::new(user_id, friend_id))
            .await
        {
            Ok(friendship) => {
                tracing::info!(user_id, friend_id, "Friend added");
                Ok(friendship)
            }
            Err(StorageError::AlreadyExists(detail)) => {
                tracing::debug!(user_id, friend_id, %detail, "Lost friend insert race");
                Err(duplicate(user_id, friend_id))
            }
            Err(e) => {
                // A concurrent insert of the same pair can also abort as a
                // transaction conflict
                if self.find_friendship(user_id, friend_id).await?.is_some() {
                    tracing::debug!(user_id, friend_id, error = %e, "Lost friend insert race");
                    return Err(duplicate(user_id, friend_id));
                }
                Err(e.into())
            }
        }
    }

    /// Remove `friend_id` from the caller's friend list.
    ///
    /// Removing a friend that is not in the list succeeds.
    pub async fn remove_friend(&self, actor: &Actor, friend_id: &str) -> Result<()> {
        let identity = actor.identity()?;
        let removed = self
            .store
            .delete_friendship(&identity.id, friend_id)
            .await?;

        tracing::info!(user_id = %identity.id, friend_id, removed, "Friend removed");
        Ok(())
    }

    /// Users matching `query`, excluding the caller unless configured otherwise
    pub async fn search_users(&self, actor: &Actor, query: &str) -> Result<Vec<User>> {
        // One extra row leaves room for dropping the caller
        let mut users = self
            .directory
            .search_users(query, self.config.max_search_results + 1)
            .await?;

        if self.config.exclude_self_from_search
            && let Some(caller) = actor.id()
        {
            users.retain(|user| user.id != caller);
        }
        users.truncate(self.config.max_search_results);

        Ok(users)
    }
}

fn duplicate(user_id: &str, friend_id: &str) -> NoteAppError {
    NoteAppError::Duplicate {
        user_id: user_id.to_string(),
        friend_id: friend_id.to_string(),
    }
}
