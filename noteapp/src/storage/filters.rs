//! Filter types for storage queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter for post queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilter {
    /// Only posts written by this user
    pub user_id: Option<String>,

    /// Only posts created after this time
    pub created_after: Option<DateTime<Utc>>,

    /// Only posts created before this time
    pub created_before: Option<DateTime<Utc>>,
}

impl PostFilter {
    pub fn by_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }
}
