//! Entry point bundling the NoteApp services

use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

use super::comments::CommentService;
use super::directory::{StoreUserDirectory, UserDirectory};
use super::friends::FriendService;
use super::posts::PostService;
use super::users::UserService;
use crate::config::NoteAppConfig;
use crate::storage::traits::NoteStore;

/// The primary interface for interacting with NoteApp.
///
/// All services share one store handle; cloning the manager is cheap.
#[derive(Debug, Clone)]
pub struct NoteManager {
    storage: Arc<dyn NoteStore>,
    directory: Arc<dyn UserDirectory>,
    friends: FriendService,
    posts: PostService,
    comments: CommentService,
    users: UserService,
    config: NoteAppConfig,
    _log_guard: Option<Arc<WorkerGuard>>,
}

impl NoteManager {
    /// Create a manager whose user directory is the store's user table
    pub fn new(storage: Arc<dyn NoteStore>, config: NoteAppConfig) -> Self {
        let directory: Arc<dyn UserDirectory> =
            Arc::new(StoreUserDirectory::new(Arc::clone(&storage)));
        Self::with_directory(storage, directory, config)
    }

    /// Create a manager that resolves friends through a custom directory
    pub fn with_directory(
        storage: Arc<dyn NoteStore>,
        directory: Arc<dyn UserDirectory>,
        config: NoteAppConfig,
    ) -> Self {
        Self {
            friends: FriendService::new(
                Arc::clone(&storage),
                Arc::clone(&directory),
                config.friends.clone(),
            ),
            posts: PostService::new(Arc::clone(&storage), config.posts.clone()),
            comments: CommentService::new(Arc::clone(&storage), config.posts.clone()),
            users: UserService::new(Arc::clone(&storage), config.users.clone()),
            storage,
            directory,
            config,
            _log_guard: None,
        }
    }

    pub(crate) fn with_log_guard(mut self, guard: Option<WorkerGuard>) -> Self {
        self._log_guard = guard.map(Arc::new);
        self
    }

    pub fn friends(&self) -> &FriendService {
        &self.friends
    }

    pub fn posts(&self) -> &PostService {
        &self.posts
    }

    pub fn comments(&self) -> &CommentService {
        &self.comments
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn directory(&self) -> &Arc<dyn UserDirectory> {
        &self.directory
    }

    pub fn storage(&self) -> &Arc<dyn NoteStore> {
        &self.storage
    }

    pub fn config(&self) -> &NoteAppConfig {
        &self.config
    }
}
