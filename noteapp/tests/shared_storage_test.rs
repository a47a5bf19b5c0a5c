//! Integration tests for the SurrealDB-backed store
//!
//! Every test runs against a fresh in-memory engine.

use noteapp::models::{Comment, Friendship, Post, PostImage, User};
use noteapp::storage::{
    errors::StorageError,
    filters::PostFilter,
    shared_storage::{SharedStorage, SharedStorageConfig},
    traits::{BaseStore, CommentStore, FriendshipStore, PostStore, UserStore},
};

type TestStorage = SharedStorage<surrealdb::engine::local::Db>;

async fn create_test_storage() -> Result<TestStorage, Box<dyn std::error::Error>> {
    let config = SharedStorageConfig {
        namespace: "test".to_string(),
        database: "noteapp_test".to_string(),
        ..Default::default()
    };

    let client = surrealdb::Surreal::new::<surrealdb::engine::local::Mem>(()).await?;
    let storage = SharedStorage::new(client, config).await?;
    Ok(storage)
}

#[tokio::test]
async fn test_shared_storage_health_and_metadata() {
    let storage = create_test_storage()
        .await
        .expect("Failed to create test storage");

    let health = storage.health_check().await.expect("Health check failed");
    assert!(health, "Storage should be healthy");

    let metadata = storage
        .get_metadata()
        .await
        .expect("Failed to get metadata");
    assert_eq!(metadata["type"], "shared_storage");
    assert_eq!(metadata["database"], "noteapp_test");
    assert_eq!(metadata["namespace"], "test");
    assert_eq!(metadata["engine"], "surrealdb_memory");
}

#[tokio::test]
async fn test_user_operations() {
    let storage = create_test_storage().await.unwrap();

    let user = User::new("alice", Some("alice@example.com".to_string()), "hash");
    let created = storage.create_user(user.clone()).await.expect("Failed to create user");
    assert_eq!(created.id, user.id);
    assert_eq!(created.username, "alice");
    assert_eq!(created.password_hash, "hash");

    let fetched = storage.get_user(&user.id).await.unwrap().expect("User should exist");
    assert_eq!(fetched.email.as_deref(), Some("alice@example.com"));

    let by_name = storage.get_user_by_username("alice").await.unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(user.id.clone()));
    assert!(storage.get_user_by_username("Alice").await.unwrap().is_none());

    let mut changed = fetched.clone();
    changed.username = "alice2".to_string();
    changed.email = None;
    let updated = storage.update_user(changed).await.unwrap();
    assert_eq!(updated.username, "alice2");
    assert_eq!(updated.email, None);

    assert_eq!(storage.count_users().await.unwrap(), 1);
    assert!(storage.delete_user(&user.id).await.unwrap());
    assert!(!storage.delete_user(&user.id).await.unwrap());
    assert_eq!(storage.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_uuid_keys_come_back_unescaped() {
    let storage = create_test_storage().await.unwrap();

    let user = storage
        .create_user(User::new("carol", None, "hash"))
        .await
        .unwrap();
    assert!(uuid::Uuid::parse_str(&user.id).is_ok(), "id was {}", user.id);

    let fetched = storage.get_user(&user.id).await.unwrap().expect("User should exist");
    assert_eq!(fetched.id, user.id);

    let listed = storage.list_users(None, None).await.unwrap();
    assert_eq!(listed[0].id, user.id);

    let post = storage
        .create_post(Post::new(&user.id, &user.username, "hello"))
        .await
        .unwrap();
    let fetched = storage.get_post(&post.id).await.unwrap().expect("Post should exist");
    assert_eq!(fetched.id, post.id);
}

#[tokio::test]
async fn test_search_users_matches_username_and_email() {
    let storage = create_test_storage().await.unwrap();

    for (name, email) in [
        ("Dave", None),
        ("daniel", Some("dan@example.com")),
        ("erin", Some("erin@DAta.org")),
        ("frank", None),
    ] {
        storage
            .create_user(User::new(name, email.map(str::to_string), "hash"))
            .await
            .unwrap();
    }

    let names = |users: Vec<User>| {
        let mut names: Vec<_> = users.into_iter().map(|u| u.username).collect();
        names.sort();
        names
    };

    let found = storage.search_users("da", 10).await.unwrap();
    assert_eq!(names(found), vec!["Dave", "daniel", "erin"]);

    let found = storage.search_users("example.com", 10).await.unwrap();
    assert_eq!(names(found), vec!["daniel"]);

    let found = storage.search_users("da", 2).await.unwrap();
    assert_eq!(found.len(), 2);

    assert!(storage.search_users("zzz", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_username_is_unique() {
    let storage = create_test_storage().await.unwrap();

    storage.create_user(User::new("dave", None, "h1")).await.unwrap();
    let err = storage
        .create_user(User::new("dave", None, "h2"))
        .await
        .expect_err("Second user with the same name should fail");
    assert!(matches!(err, StorageError::AlreadyExists(_)), "got {err:?}");

    let carol = storage.create_user(User::new("carol", None, "h3")).await.unwrap();
    let mut renamed = carol.clone();
    renamed.username = "dave".to_string();
    let err = storage.update_user(renamed).await.expect_err("Rename onto a taken name");
    assert!(matches!(err, StorageError::AlreadyExists(_)), "got {err:?}");
}

#[tokio::test]
async fn test_list_users_is_ordered_and_paginated() {
    let storage = create_test_storage().await.unwrap();
    for name in ["carol", "alice", "bob"] {
        storage.create_user(User::new(name, None, "h")).await.unwrap();
    }

    let names: Vec<String> = storage
        .list_users(None, None)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);

    let page = storage.list_users(Some(1), Some(1)).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].username, "bob");
}

#[tokio::test]
async fn test_friendship_operations() {
    let storage = create_test_storage().await.unwrap();

    let created = storage
        .create_friendship(Friendship::new("alice", "bob"))
        .await
        .expect("Failed to create friendship");
    assert_eq!(created.user_id, "alice");
    assert_eq!(created.friend_id, "bob");

    storage
        .create_friendship(Friendship::new("alice", "carol"))
        .await
        .unwrap();

    let err = storage
        .create_friendship(Friendship::new("alice", "bob"))
        .await
        .expect_err("Duplicate pair must be rejected");
    assert!(matches!(err, StorageError::AlreadyExists(_)), "got {err:?}");

    // Directional: the reverse pair is a separate record
    storage
        .create_friendship(Friendship::new("bob", "alice"))
        .await
        .unwrap();

    let friends: Vec<String> = storage
        .list_friendships_for_user("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.friend_id)
        .collect();
    assert_eq!(friends, vec!["bob", "carol"]);

    assert!(storage.get_friendship("alice", "bob").await.unwrap().is_some());
    assert!(storage.get_friendship("carol", "alice").await.unwrap().is_none());

    assert!(storage.delete_friendship("alice", "bob").await.unwrap());
    assert!(!storage.delete_friendship("alice", "bob").await.unwrap());
    assert!(storage.get_friendship("alice", "bob").await.unwrap().is_none());
    assert!(storage.get_friendship("bob", "alice").await.unwrap().is_some());
}

#[tokio::test]
async fn test_friendships_involving_a_user() {
    let storage = create_test_storage().await.unwrap();
    for (user, friend) in [("alice", "bob"), ("carol", "alice"), ("bob", "carol")] {
        storage
            .create_friendship(Friendship::new(user, friend))
            .await
            .unwrap();
    }

    assert_eq!(storage.list_friendships_involving("alice").await.unwrap().len(), 2);
    assert_eq!(storage.delete_friendships_involving("alice").await.unwrap(), 2);
    assert!(storage.list_friendships_involving("alice").await.unwrap().is_empty());

    let remaining = storage.list_friendships_for_user("bob").await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].friend_id, "carol");
}

#[tokio::test]
async fn test_post_operations() {
    let storage = create_test_storage().await.unwrap();

    let with_image = Post::new("alice", "alice", "hello")
        .with_image(Some(PostImage::from_bytes("image/png", b"png-bytes")));
    let first = storage.create_post(with_image).await.expect("Failed to create post");
    assert_eq!(first.image.as_ref().map(|i| i.content_type.as_str()), Some("image/png"));

    let second = storage.create_post(Post::new("bob", "bob", "hi")).await.unwrap();
    let third = storage.create_post(Post::new("alice", "alice", "again")).await.unwrap();

    let all: Vec<String> = storage
        .list_posts(None, None, None)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(all, vec![third.id.clone(), second.id.clone(), first.id.clone()]);

    let alices = storage
        .list_posts(Some(PostFilter::by_user("alice")), None, None)
        .await
        .unwrap();
    assert_eq!(alices.len(), 2);
    assert_eq!(storage.count_posts(Some(PostFilter::by_user("alice"))).await.unwrap(), 2);
    assert_eq!(storage.count_posts(None).await.unwrap(), 3);

    let mut edited = storage.get_post(&first.id).await.unwrap().unwrap();
    edited.content = "hello, edited".to_string();
    edited.image = None;
    let updated = storage.update_post(edited).await.unwrap();
    assert_eq!(updated.content, "hello, edited");
    assert!(updated.image.is_none());

    assert!(storage.delete_post(&first.id).await.unwrap());
    assert!(storage.get_post(&first.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_comment_operations() {
    let storage = create_test_storage().await.unwrap();
    let post = storage.create_post(Post::new("alice", "alice", "post")).await.unwrap();
    let other = storage.create_post(Post::new("bob", "bob", "other")).await.unwrap();

    let first = storage
        .create_comment(Comment::new(&post.id, "bob", "bob", "nice"))
        .await
        .unwrap();
    storage
        .create_comment(Comment::new(&post.id, "carol", "carol", "agreed"))
        .await
        .unwrap();
    storage
        .create_comment(Comment::new(&other.id, "bob", "bob", "mine"))
        .await
        .unwrap();

    let on_post: Vec<String> = storage
        .list_comments_for_post(&post.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.content)
        .collect();
    assert_eq!(on_post, vec!["nice", "agreed"]);
    assert_eq!(storage.list_comments_by_user("bob").await.unwrap().len(), 2);

    let mut edited = storage.get_comment(&first.id).await.unwrap().unwrap();
    edited.content = "very nice".to_string();
    assert_eq!(storage.update_comment(edited).await.unwrap().content, "very nice");

    assert_eq!(storage.delete_comments_for_post(&post.id).await.unwrap(), 2);
    assert_eq!(storage.delete_comments_by_user("bob").await.unwrap(), 1);
    assert!(storage.get_comment(&first.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_removes_everything() {
    let storage = create_test_storage().await.unwrap();
    storage.create_user(User::new("alice", None, "h")).await.unwrap();
    storage.create_friendship(Friendship::new("alice", "bob")).await.unwrap();
    storage.create_post(Post::new("alice", "alice", "x")).await.unwrap();

    storage.clear().await.unwrap();

    assert_eq!(storage.count_users().await.unwrap(), 0);
    assert_eq!(storage.count_posts(None).await.unwrap(), 0);
    assert!(storage.list_friendships_for_user("alice").await.unwrap().is_empty());
}
