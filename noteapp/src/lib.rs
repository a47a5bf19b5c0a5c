//! # NoteApp
//!
//! Domain library for a small note-sharing network: users write posts (with
//! an optional image), comment on each other's posts and keep a list of
//! friends.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noteapp::prelude::*;
//!
//! async fn example() -> Result<()> {
//!     let config = ConfigBuilder::development().build()?;
//!     let app = noteapp::init(config).await?;
//!
//!     let alice = app.users().register(User::new("alice", None, "hash")).await?;
//!     let bob = app.users().register(User::new("bob", None, "hash")).await?;
//!
//!     let actor = Actor::user(&alice.id, &alice.username);
//!     app.friends().add_friend(&actor, &bob.id).await?;
//!
//!     assert_eq!(app.friends().list_friends(&actor).await?.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Storage**: traits in [`storage::traits`] with a SurrealDB implementation
//!   (in-memory, embedded RocksDB or remote)
//! - **Core**: services that take the caller explicitly as an [`core::Actor`]
//!   and enforce authentication, existence and ownership in that order
//! - **Config / logging**: figment-based configuration and tracing setup

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::init;

    pub use crate::config::{ConfigBuilder, DeletePolicy, LogLevel, NoteAppConfig};

    pub use crate::models::{Comment, Friendship, ImageUpload, Post, PostImage, User, UserProfile};

    pub use crate::core::{
        Actor, CommentService, FriendService, Identity, NewPost, NoteManager, PostService,
        PostUpdate, StoreUserDirectory, UserDirectory, UserService,
    };

    pub use crate::storage::errors::StorageError;

    pub use crate::{NoteAppError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for NoteApp operations
#[derive(Debug, thiserror::Error)]
pub enum NoteAppError {
    /// A user tried to add themselves as a friend
    #[error("You cannot add yourself as a friend")]
    SelfReference,

    /// The friend link already exists
    #[error("User '{friend_id}' is already in your friends list")]
    Duplicate { user_id: String, friend_id: String },

    /// The referenced user does not exist in the directory
    #[error("User '{0}' does not exist")]
    UnknownUser(String),

    /// The operation requires a logged-in user
    #[error("You must be logged in to do that")]
    NotAuthenticated,

    /// The caller does not own the resource
    #[error("You are not allowed to {action} this {resource}")]
    Forbidden {
        resource: &'static str,
        action: &'static str,
    },

    /// The resource does not exist
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// Invalid input
    #[error("{0}")]
    Validation(String),

    /// The request conflicts with existing state
    #[error("{0}")]
    Conflict(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::errors::StorageError),
}

impl NoteAppError {
    pub(crate) fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        NoteAppError::NotFound {
            resource,
            id: id.into(),
        }
    }
}

impl From<crate::config::ConfigError> for NoteAppError {
    fn from(err: crate::config::ConfigError) -> Self {
        NoteAppError::Configuration(err.to_string())
    }
}

/// Result type for NoteApp operations
pub type Result<T> = std::result::Result<T, NoteAppError>;

/// Initialize NoteApp with the provided configuration
///
/// Sets up logging, opens the configured store and returns a
/// [`core::NoteManager`] giving access to every service.
pub async fn init(config: config::NoteAppConfig) -> Result<core::NoteManager> {
    let log_guard = logging::init(&config.logging)?;

    let storage = storage::create_storage_service(&config).await?;
    let storage = std::sync::Arc::from(storage);

    Ok(core::NoteManager::new(storage, config).with_log_guard(log_guard))
}
