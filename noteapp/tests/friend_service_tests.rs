//! Friend list behaviour through the public services, backed by the
//! in-memory store and the store-backed user directory.

use futures::future::join_all;
use noteapp::config::ConfigBuilder;
use noteapp::core::{Actor, NoteManager};
use noteapp::models::User;
use noteapp::storage::create_memory_store;
use noteapp::storage::traits::FriendshipStore;
use noteapp::NoteAppError;
use std::sync::Arc;

async fn manager() -> NoteManager {
    let config = ConfigBuilder::testing().build().unwrap();
    let store = Arc::from(create_memory_store().await.unwrap());
    NoteManager::new(store, config)
}

async fn register(app: &NoteManager, username: &str, email: Option<&str>) -> Actor {
    let user = app
        .users()
        .register(User::new(username, email.map(str::to_string), "hash"))
        .await
        .unwrap();
    Actor::user(user.id, user.username)
}

fn id(actor: &Actor) -> &str {
    actor.id().unwrap()
}

#[tokio::test]
async fn test_add_then_list() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;
    let bob = register(&app, "bob", None).await;

    let friendship = app.friends().add_friend(&alice, id(&bob)).await.unwrap();
    assert_eq!(friendship.user_id, id(&alice));
    assert_eq!(friendship.friend_id, id(&bob));

    let friends = app.friends().list_friends(&alice).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].friend_id, id(&bob));

    // One directional record: bob's list is unaffected
    assert!(app.friends().list_friends(&bob).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_self_add_always_fails() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;

    let result = app.friends().add_friend(&alice, id(&alice)).await;
    assert!(matches!(result, Err(NoteAppError::SelfReference)));
    assert!(app.friends().list_friends(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_second_add_is_duplicate_and_store_keeps_one_record() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;
    let bob = register(&app, "bob", None).await;

    app.friends().add_friend(&alice, id(&bob)).await.unwrap();
    let second = app.friends().add_friend(&alice, id(&bob)).await;

    assert!(matches!(second, Err(NoteAppError::Duplicate { .. })));
    assert_eq!(app.friends().list_friends(&alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_friend_is_rejected() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;

    let result = app.friends().add_friend(&alice, "no-such-user").await;
    assert!(matches!(result, Err(NoteAppError::UnknownUser(_))));
    assert!(app.friends().list_friends(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;
    let bob = register(&app, "bob", None).await;

    app.friends().add_friend(&alice, id(&bob)).await.unwrap();
    app.friends().remove_friend(&alice, id(&bob)).await.unwrap();
    app.friends().remove_friend(&alice, id(&bob)).await.unwrap();

    assert!(app
        .friends()
        .find_friendship(id(&alice), id(&bob))
        .await
        .unwrap()
        .is_none());

    // Removing someone who was never a friend is also fine
    app.friends().remove_friend(&alice, "stranger").await.unwrap();
}

#[tokio::test]
async fn test_anonymous_mutations_are_rejected_without_side_effects() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;
    let bob = register(&app, "bob", None).await;
    app.friends().add_friend(&alice, id(&bob)).await.unwrap();

    let add = app.friends().add_friend(&Actor::Anonymous, id(&bob)).await;
    assert!(matches!(add, Err(NoteAppError::NotAuthenticated)));

    let remove = app.friends().remove_friend(&Actor::Anonymous, id(&bob)).await;
    assert!(matches!(remove, Err(NoteAppError::NotAuthenticated)));

    let list = app.friends().list_friends(&Actor::Anonymous).await;
    assert!(matches!(list, Err(NoteAppError::NotAuthenticated)));

    assert_eq!(
        app.storage()
            .list_friendships_involving(id(&bob))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_search_matches_username_and_email_and_skips_caller() {
    let app = manager().await;
    let dave = register(&app, "dave", Some("dave@example.com")).await;
    register(&app, "DaveSmith", None).await;
    register(&app, "carol", Some("carol@dave.org")).await;
    register(&app, "erin", None).await;

    let mut names: Vec<String> = app
        .friends()
        .search_users(&dave, "DAVE")
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    names.sort();
    assert_eq!(names, vec!["DaveSmith", "carol"]);

    assert!(app.friends().search_users(&dave, "").await.unwrap().is_empty());
    assert!(app.friends().search_users(&dave, "   ").await.unwrap().is_empty());
    assert!(app.friends().search_users(&dave, "zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_friend_users_with_search() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;
    let bob = register(&app, "bob", Some("bob@work.example")).await;
    let carol = register(&app, "carol", None).await;

    app.friends().add_friend(&alice, id(&bob)).await.unwrap();
    app.friends().add_friend(&alice, id(&carol)).await.unwrap();

    let all = app.friends().list_friend_users(&alice, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let work = app
        .friends()
        .list_friend_users(&alice, Some("work"))
        .await
        .unwrap();
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].username, "bob");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_of_same_pair_create_one_record() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;
    let bob = register(&app, "bob", None).await;

    let attempts = (0..8).map(|_| {
        let app = app.clone();
        let alice = alice.clone();
        let bob_id = id(&bob).to_string();
        tokio::spawn(async move { app.friends().add_friend(&alice, &bob_id).await })
    });

    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(NoteAppError::Duplicate { .. })))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(duplicates, results.len() - 1);
    assert_eq!(app.friends().list_friends(&alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_removes_all_succeed() {
    let app = manager().await;
    let alice = register(&app, "alice", None).await;
    let bob = register(&app, "bob", None).await;
    app.friends().add_friend(&alice, id(&bob)).await.unwrap();

    let attempts = (0..4).map(|_| app.friends().remove_friend(&alice, id(&bob)));
    for result in join_all(attempts).await {
        result.unwrap();
    }

    assert!(app.friends().list_friends(&alice).await.unwrap().is_empty());
}
