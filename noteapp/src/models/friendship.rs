//! Directed friend links

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directed "is friends with" link from `user_id` to `friend_id`.
///
/// Adding bob as a friend of alice creates exactly one record owned by alice;
/// bob's own list is unaffected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Friendship {
    pub user_id: String,
    pub friend_id: String,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn new(user_id: impl Into<String>, friend_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            friend_id: friend_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Deterministic storage key for an ordered pair.
    ///
    /// The owner id is length-prefixed so distinct pairs never share a key.
    pub fn key_for(user_id: &str, friend_id: &str) -> String {
        format!("{}:{}|{}", user_id.len(), user_id, friend_id)
    }

    pub fn key(&self) -> String {
        Self::key_for(&self.user_id, &self.friend_id)
    }
}
