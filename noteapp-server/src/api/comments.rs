//! Comment endpoints

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::auth::{AuthContext, actor},
    api::dto::{CommentDto, CommentRequest},
    error::{ApiJson, ServerResult},
    state::AppState,
};

/// Comment on a post
#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "comments",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentDto),
        (status = 400, description = "Empty comment"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    Path(post_id): Path<String>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> ServerResult<(StatusCode, Json<CommentDto>)> {
    let actor = actor(&auth);
    let comment = state
        .notes
        .comments()
        .add_comment(&actor, &post_id, &request.content)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentDto::from(comment))))
}

#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    tag = "comments",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment details", body = CommentDto),
        (status = 404, description = "Comment not found"),
    )
)]
pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<CommentDto>> {
    let comment = state.notes.comments().get_comment(&id).await?;
    Ok(Json(CommentDto::from(comment)))
}

#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    tag = "comments",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Comment not found"),
    )
)]
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> ServerResult<Json<CommentDto>> {
    let actor = actor(&auth);
    let comment = state
        .notes
        .comments()
        .update_comment(&actor, &id, &request.content)
        .await?;

    Ok(Json(CommentDto::from(comment)))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "comments",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Comment not found"),
    )
)]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let actor = actor(&auth);
    state.notes.comments().delete_comment(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
