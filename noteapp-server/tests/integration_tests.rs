use std::sync::Arc;

use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use http::StatusCode;
use noteapp::config::ConfigBuilder;
use noteapp::core::NoteManager;
use noteapp_server::{AppState, config::ServerConfig, create_router};
use serde_json::{Value, json};

/// Helper function to create a test server backed by an in-memory database
async fn create_test_server() -> TestServer {
    let config = ConfigBuilder::testing()
        .with_max_image_bytes(1024)
        .build()
        .expect("Failed to create config");
    let store = noteapp::storage::create_memory_store()
        .await
        .expect("Failed to open store");
    let notes = NoteManager::new(Arc::from(store), config);

    let server_config = ServerConfig {
        jwt_secret: "integration-test-secret".to_string(),
        password_cost: 4,
        ..Default::default()
    };

    let state = Arc::new(AppState::new(notes, server_config));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// A signed-up user: `(Authorization header value, user id)`
async fn signup(server: &TestServer, username: &str) -> (String, String) {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "password": "password123",
            "email": format!("{}@example.com", username)
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    (
        format!("Bearer {}", body["token"].as_str().unwrap()),
        body["user_id"].as_str().unwrap().to_string(),
    )
}

fn text_form(content: &str) -> MultipartForm {
    MultipartForm::new().add_text("content", content.to_string())
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["delete_policy"], "restrict");
}

#[tokio::test]
async fn test_swagger_docs_available() {
    let server = create_test_server().await;

    let response = server.get("/docs/").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_openapi_spec_available() {
    let server = create_test_server().await;

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["info"]["title"], "NoteApp API");
    assert!(json["paths"]["/api/friends/add"].is_object());
}

mod friends {
    use super::*;

    #[tokio::test]
    async fn test_add_and_list_friend() {
        let server = create_test_server().await;
        let (alice, _) = signup(&server, "alice").await;
        let (bob, bob_id) = signup(&server, "bob").await;

        let response = server
            .post("/api/friends/add")
            .add_header("Authorization", alice.clone())
            .json(&json!({ "friend_id": bob_id }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["friend"]["username"], "bob");

        let friends: Value = server
            .get("/api/friends")
            .add_header("Authorization", alice)
            .await
            .json();
        assert_eq!(friends.as_array().unwrap().len(), 1);
        assert_eq!(friends[0]["id"], bob_id);

        // Directional: bob did not add alice
        let friends: Value = server
            .get("/api/friends")
            .add_header("Authorization", bob)
            .await
            .json();
        assert!(friends.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_friend_error_statuses() {
        let server = create_test_server().await;
        let (alice, alice_id) = signup(&server, "alice").await;
        let (_, bob_id) = signup(&server, "bob").await;

        // Self
        let response = server
            .post("/api/friends/add")
            .add_header("Authorization", alice.clone())
            .json(&json!({ "friend_id": alice_id }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().is_some());

        // Unknown
        server
            .post("/api/friends/add")
            .add_header("Authorization", alice.clone())
            .json(&json!({ "friend_id": "no-such-user" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // Duplicate
        server
            .post("/api/friends/add")
            .add_header("Authorization", alice.clone())
            .json(&json!({ "friend_id": bob_id }))
            .await
            .assert_status_ok();
        let response = server
            .post("/api/friends/add")
            .add_header("Authorization", alice.clone())
            .json(&json!({ "friend_id": bob_id }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "duplicate");

        let friends: Value = server
            .get("/api/friends")
            .add_header("Authorization", alice)
            .await
            .json();
        assert_eq!(friends.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_friend_body_uses_error_shape() {
        let server = create_test_server().await;
        let (alice, _) = signup(&server, "alice").await;

        for path in ["/api/friends/add", "/api/friends/delete"] {
            let response = server
                .post(path)
                .add_header("Authorization", alice.clone())
                .json(&json!({ "friend": "bob" }))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: Value = response.json();
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "bad_request");
            assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
        }

        let response = server
            .post("/api/friends/add")
            .add_header("Authorization", alice)
            .text("{not json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_anonymous_add_friend_points_at_login() {
        let server = create_test_server().await;
        let (_, bob_id) = signup(&server, "bob").await;

        let response = server
            .post("/api/friends/add")
            .json(&json!({ "friend_id": bob_id }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["details"]["login"], "/api/auth/login");
    }

    #[tokio::test]
    async fn test_delete_friend_is_idempotent() {
        let server = create_test_server().await;
        let (alice, _) = signup(&server, "alice").await;
        let (_, bob_id) = signup(&server, "bob").await;

        server
            .post("/api/friends/add")
            .add_header("Authorization", alice.clone())
            .json(&json!({ "friend_id": bob_id }))
            .await
            .assert_status_ok();

        for _ in 0..2 {
            let response = server
                .post("/api/friends/delete")
                .add_header("Authorization", alice.clone())
                .json(&json!({ "friend_id": bob_id }))
                .await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["success"], true);
        }

        let friends: Value = server
            .get("/api/friends")
            .add_header("Authorization", alice)
            .await
            .json();
        assert!(friends.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_excludes_caller() {
        let server = create_test_server().await;
        let (dave, _) = signup(&server, "dave").await;
        signup(&server, "daniel").await;
        signup(&server, "erin").await;

        let results: Value = server
            .get("/api/friends/search")
            .add_query_param("query", "DA")
            .add_header("Authorization", dave.clone())
            .await
            .json();
        let names: Vec<&str> = results
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["username"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["daniel"]);

        // Matches on email too
        let results: Value = server
            .get("/api/friends/search")
            .add_query_param("query", "erin@example")
            .add_header("Authorization", dave.clone())
            .await
            .json();
        assert_eq!(results.as_array().unwrap().len(), 1);

        let results: Value = server
            .get("/api/friends/search")
            .add_query_param("query", "   ")
            .add_header("Authorization", dave)
            .await
            .json();
        assert!(results.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_friend_list_search_query() {
        let server = create_test_server().await;
        let (alice, _) = signup(&server, "alice").await;
        let (_, bob_id) = signup(&server, "bob").await;
        let (_, carol_id) = signup(&server, "carol").await;

        for friend_id in [&bob_id, &carol_id] {
            server
                .post("/api/friends/add")
                .add_header("Authorization", alice.clone())
                .json(&json!({ "friend_id": friend_id }))
                .await
                .assert_status_ok();
        }

        let friends: Value = server
            .get("/api/friends")
            .add_query_param("search_query", "car")
            .add_header("Authorization", alice)
            .await
            .json();
        assert_eq!(friends.as_array().unwrap().len(), 1);
        assert_eq!(friends[0]["id"], carol_id);
    }
}

mod posts {
    use super::*;

    #[tokio::test]
    async fn test_create_post_with_image() {
        let server = create_test_server().await;
        let (alice, alice_id) = signup(&server, "alice").await;

        let form = text_form("Look at this").add_part(
            "image",
            Part::bytes(vec![0x89, b'P', b'N', b'G'])
                .file_name("tiny.png")
                .mime_type("image/png"),
        );
        let response = server
            .post("/api/posts")
            .add_header("Authorization", alice)
            .multipart(form)
            .await;
        response.assert_status(StatusCode::CREATED);

        let post: Value = response.json();
        assert_eq!(post["content"], "Look at this");
        assert_eq!(post["user_id"], alice_id);
        assert!(
            post["image_url"]
                .as_str()
                .unwrap()
                .starts_with("data:image/png;base64,")
        );
    }

    #[tokio::test]
    async fn test_create_post_validation() {
        let server = create_test_server().await;
        let (alice, _) = signup(&server, "alice").await;

        server
            .post("/api/posts")
            .multipart(text_form("anonymous"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .post("/api/posts")
            .add_header("Authorization", alice.clone())
            .multipart(text_form("   "))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let svg = text_form("vector").add_part(
            "image",
            Part::bytes(b"<svg/>".to_vec())
                .file_name("x.svg")
                .mime_type("image/svg+xml"),
        );
        server
            .post("/api/posts")
            .add_header("Authorization", alice.clone())
            .multipart(svg)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let too_big = text_form("huge").add_part(
            "image",
            Part::bytes(vec![0u8; 2048])
                .file_name("big.png")
                .mime_type("image/png"),
        );
        server
            .post("/api/posts")
            .add_header("Authorization", alice)
            .multipart(too_big)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_only_author_can_edit_or_delete() {
        let server = create_test_server().await;
        let (alice, _) = signup(&server, "alice").await;
        let (bob, _) = signup(&server, "bob").await;

        let post: Value = server
            .post("/api/posts")
            .add_header("Authorization", alice.clone())
            .multipart(text_form("original"))
            .await
            .json();
        let path = format!("/api/posts/{}", post["id"].as_str().unwrap());

        server
            .put(&path)
            .add_header("Authorization", bob.clone())
            .multipart(text_form("hijacked"))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .delete(&path)
            .add_header("Authorization", bob.clone())
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .delete("/api/posts/missing")
            .add_header("Authorization", bob)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let response = server
            .put(&path)
            .add_header("Authorization", alice.clone())
            .multipart(text_form("edited"))
            .await;
        response.assert_status_ok();
        let edited: Value = response.json();
        assert_eq!(edited["content"], "edited");

        server
            .delete(&path)
            .add_header("Authorization", alice)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_comments_appear_on_post() {
        let server = create_test_server().await;
        let (alice, _) = signup(&server, "alice").await;
        let (bob, _) = signup(&server, "bob").await;

        let post: Value = server
            .post("/api/posts")
            .add_header("Authorization", alice.clone())
            .multipart(text_form("note"))
            .await
            .json();
        let post_id = post["id"].as_str().unwrap();

        let response = server
            .post(&format!("/api/posts/{}/comments", post_id))
            .add_header("Authorization", bob.clone())
            .json(&json!({ "content": "nice" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let comment: Value = response.json();
        let comment_path = format!("/api/comments/{}", comment["id"].as_str().unwrap());

        let fetched: Value = server.get(&format!("/api/posts/{}", post_id)).await.json();
        assert_eq!(fetched["comments"][0]["content"], "nice");
        assert_eq!(fetched["comments"][0]["username"], "bob");

        // Only the comment author may change it
        server
            .put(&comment_path)
            .add_header("Authorization", alice.clone())
            .json(&json!({ "content": "not yours" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let updated: Value = server
            .put(&comment_path)
            .add_header("Authorization", bob.clone())
            .json(&json!({ "content": "very nice" }))
            .await
            .json();
        assert_eq!(updated["content"], "very nice");

        server
            .delete(&comment_path)
            .add_header("Authorization", bob)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server.get(&comment_path).await.assert_status(StatusCode::NOT_FOUND);

        server
            .post("/api/posts/missing/comments")
            .add_header("Authorization", alice)
            .json(&json!({ "content": "hello?" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod profiles {
    use super::*;

    #[tokio::test]
    async fn test_profile_lists_posts() {
        let server = create_test_server().await;
        let (alice, alice_id) = signup(&server, "alice").await;

        server
            .post("/api/posts")
            .add_header("Authorization", alice.clone())
            .multipart(text_form("hello"))
            .await
            .assert_status(StatusCode::CREATED);

        let profile: Value = server
            .get(&format!("/api/users/{}/profile", alice_id))
            .await
            .json();
        assert_eq!(profile["user"]["username"], "alice");
        assert_eq!(profile["posts"].as_array().unwrap().len(), 1);

        let own: Value = server
            .get("/api/profile")
            .add_header("Authorization", alice)
            .await
            .json();
        assert_eq!(own["user"]["id"], alice_id);

        server
            .get("/api/profile")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/api/users/nobody/profile")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
