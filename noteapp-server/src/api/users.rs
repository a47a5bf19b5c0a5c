//! Profile endpoints

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    api::auth::{AuthContext, actor},
    api::dto::ProfileDto,
    error::ServerResult,
    state::AppState,
};

/// A user's profile and posts
#[utoipa::path(
    get,
    path = "/api/users/{id}/profile",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User and their posts, newest first", body = ProfileDto),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ServerResult<Json<ProfileDto>> {
    let profile = state.notes.users().get_profile(&user_id).await?;
    Ok(Json(ProfileDto::from(profile)))
}

/// The caller's own profile
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "users",
    responses(
        (status = 200, description = "Caller and their posts, newest first", body = ProfileDto),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn own_profile(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
) -> ServerResult<Json<ProfileDto>> {
    let actor = actor(&auth);
    let identity = actor.identity()?;

    let profile = state.notes.users().get_profile(&identity.id).await?;
    Ok(Json(ProfileDto::from(profile)))
}
