//! Friend list endpoints
//!
//! Failed friend operations answer with the same `{success, message}` shape
//! as successful ones, using the status codes from
//! [`ServerError`](crate::error::ServerError).

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use noteapp::core::UserDirectory;

use crate::{
    api::auth::{AuthContext, actor},
    api::dto::{FriendListParams, FriendRequest, FriendResponse, SearchParams, UserDto},
    error::{ApiJson, ServerResult},
    state::AppState,
};

/// The caller's friends
#[utoipa::path(
    get,
    path = "/api/friends",
    tag = "friends",
    params(FriendListParams),
    responses(
        (status = 200, description = "Users on the caller's friend list", body = Vec<UserDto>),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn list_friends(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    Query(params): Query<FriendListParams>,
) -> ServerResult<Json<Vec<UserDto>>> {
    let actor = actor(&auth);
    let friends = state
        .notes
        .friends()
        .list_friend_users(&actor, params.search_query.as_deref())
        .await?;

    Ok(Json(friends.into_iter().map(UserDto::from).collect()))
}

/// Find users to add
#[utoipa::path(
    get,
    path = "/api/friends/search",
    tag = "friends",
    params(SearchParams),
    responses(
        (status = 200, description = "Users whose username or email matches", body = Vec<UserDto>),
    )
)]
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    Query(params): Query<SearchParams>,
) -> ServerResult<Json<Vec<UserDto>>> {
    let actor = actor(&auth);
    let users = state
        .notes
        .friends()
        .search_users(&actor, &params.query)
        .await?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Add a user to the caller's friend list
#[utoipa::path(
    post,
    path = "/api/friends/add",
    tag = "friends",
    request_body = FriendRequest,
    responses(
        (status = 200, description = "Friend added", body = FriendResponse),
        (status = 400, description = "Tried to add yourself", body = crate::error::ErrorResponse),
        (status = 401, description = "Not logged in", body = crate::error::ErrorResponse),
        (status = 404, description = "No such user", body = crate::error::ErrorResponse),
        (status = 409, description = "Already a friend", body = crate::error::ErrorResponse),
    )
)]
pub async fn add_friend(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    ApiJson(request): ApiJson<FriendRequest>,
) -> ServerResult<Json<FriendResponse>> {
    let actor = actor(&auth);
    let friendship = state
        .notes
        .friends()
        .add_friend(&actor, &request.friend_id)
        .await?;

    let friend = state
        .notes
        .directory()
        .find_user(&friendship.friend_id)
        .await?
        .map(UserDto::from);

    let message = match &friend {
        Some(user) => format!("{} was added to your friends", user.username),
        None => "Friend added".to_string(),
    };

    Ok(Json(FriendResponse {
        success: true,
        message,
        friend,
    }))
}

/// Remove a user from the caller's friend list
#[utoipa::path(
    post,
    path = "/api/friends/delete",
    tag = "friends",
    request_body = FriendRequest,
    responses(
        (status = 200, description = "Friend removed, or was not on the list", body = FriendResponse),
        (status = 401, description = "Not logged in", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_friend(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    ApiJson(request): ApiJson<FriendRequest>,
) -> ServerResult<Json<FriendResponse>> {
    let actor = actor(&auth);
    state
        .notes
        .friends()
        .remove_friend(&actor, &request.friend_id)
        .await?;

    Ok(Json(FriendResponse {
        success: true,
        message: "Friend removed".to_string(),
        friend: None,
    }))
}
