//! API implementation for the NoteApp HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    middleware,
    response::Json,
    routing::{get, post},
};
use noteapp::storage::traits::BaseStore;
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod auth;
pub mod auth_endpoints;
pub mod auth_service;
pub mod comments;
pub mod dto;
pub mod friends;
pub mod posts;
pub mod users;

use auth::auth_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        auth_endpoints::signup,
        auth_endpoints::login,
        auth_endpoints::get_account,
        auth_endpoints::update_account,
        auth_endpoints::delete_account,
        friends::list_friends,
        friends::search_users,
        friends::add_friend,
        friends::delete_friend,
        posts::list_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        comments::add_comment,
        comments::get_comment,
        comments::update_comment,
        comments::delete_comment,
        users::get_profile,
        users::own_profile,
    ),
    components(
        schemas(
            auth::SignupRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            dto::UserDto,
            dto::PostDto,
            dto::PostForm,
            dto::CommentDto,
            dto::CommentRequest,
            dto::ProfileDto,
            dto::FriendRequest,
            dto::FriendResponse,
            dto::UpdateAccountRequest,
            dto::AccountResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and account settings"),
        (name = "friends", description = "Friend list management and user search"),
        (name = "posts", description = "Posts with optional images"),
        (name = "comments", description = "Comments on posts"),
        (name = "users", description = "User profiles"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "NoteApp API",
        version = "1.0.0",
        description = "REST API for NoteApp: share notes, comment on them and keep a list of friends. Send `Authorization: Bearer <token>` from /api/auth/login to act as a user.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_request_size = state.config.max_request_size;

    let api_router = Router::new()
        // Authentication endpoints
        .route("/auth/signup", post(auth_endpoints::signup))
        .route("/auth/login", post(auth_endpoints::login))
        .route(
            "/account",
            get(auth_endpoints::get_account)
                .put(auth_endpoints::update_account)
                .delete(auth_endpoints::delete_account),
        )
        // Friend endpoints
        .route("/friends", get(friends::list_friends))
        .route("/friends/search", get(friends::search_users))
        .route("/friends/add", post(friends::add_friend))
        .route("/friends/delete", post(friends::delete_friend))
        // Post endpoints
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/{id}/comments", post(comments::add_comment))
        // Comment endpoints
        .route(
            "/comments/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        // Profile endpoints
        .route("/users/{id}/profile", get(users::get_profile))
        .route("/profile", get(users::own_profile))
        .route("/health", get(health_check))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_request_size))
        .with_state(state);

    // Main router with API prefix and documentation
    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new().nest("/api", api_router).merge(swagger_router)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = serde_json::Value)
    )
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let storage_ok = match state.notes.storage().health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            false
        }
    };

    Json(serde_json::json!({
        "status": if storage_ok { "OK" } else { "DEGRADED" },
        "version": noteapp::VERSION,
        "storage": storage_ok,
        "signup": state.config.allow_signup,
        "delete_policy": state.notes.config().users.delete_policy.to_string(),
    }))
}
