//! Domain models for users, friendships, posts and comments

pub mod friendship;
pub mod post;
pub mod user;

pub use friendship::Friendship;
pub use post::{Comment, ImageUpload, Post, PostImage, UserProfile};
pub use user::User;
