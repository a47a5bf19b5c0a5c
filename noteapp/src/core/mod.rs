//! Core services

pub mod actor;
pub mod comments;
pub mod directory;
pub mod friends;
pub mod note_manager;
pub mod posts;
pub mod users;

pub use actor::{Actor, Identity};
pub use comments::CommentService;
pub use directory::{StoreUserDirectory, UserDirectory};
pub use friends::FriendService;
pub use note_manager::NoteManager;
pub use posts::{NewPost, PostService, PostUpdate};
pub use users::UserService;
