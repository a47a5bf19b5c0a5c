//! User accounts as seen by the rest of the library

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Stable identifier, also used as the storage record key
    pub id: String,

    /// Display name, unique across the directory
    pub username: String,

    /// Optional contact address
    pub email: Option<String>,

    /// bcrypt hash of the password; never leaves the process
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(
        username: impl Into<String>,
        email: Option<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            email,
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Override the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Case-insensitive substring match over username and email.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return false;
        }
        if self.username.to_lowercase().contains(needle) {
            return true;
        }
        self.email
            .as_deref()
            .is_some_and(|email| email.to_lowercase().contains(needle))
    }
}
