//! Post endpoints
//!
//! Posts are created and edited with `multipart/form-data`: a `content` text
//! field and an optional `image` file field.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
};
use noteapp::{
    core::{NewPost, PostUpdate},
    models::ImageUpload,
};

use crate::{
    api::auth::{AuthContext, actor},
    api::dto::{PostDto, PostForm},
    error::{ServerError, ServerResult},
    state::AppState,
};

/// All posts, newest first
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Every post with its comments", body = Vec<PostDto>),
    )
)]
pub async fn list_posts(State(state): State<Arc<AppState>>) -> ServerResult<Json<Vec<PostDto>>> {
    let posts = state.notes.posts().list_posts().await?;
    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

/// A single post with its comments
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post details", body = PostDto),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<PostDto>> {
    let post = state.notes.posts().get_post(&id).await?;
    Ok(Json(PostDto::from(post)))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body(content = PostForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Empty content or unsupported image"),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    multipart: Multipart,
) -> ServerResult<(StatusCode, Json<PostDto>)> {
    let actor = actor(&auth);
    actor.identity()?;

    let (content, image) = read_post_form(multipart).await?;
    let post = state
        .notes
        .posts()
        .create_post(&actor, NewPost { content, image })
        .await?;

    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

/// Edit a post. Without an `image` field the current image is kept.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    request_body(content = PostForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Empty content or unsupported image"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ServerResult<Json<PostDto>> {
    let actor = actor(&auth);
    actor.identity()?;

    let (content, image) = read_post_form(multipart).await?;
    let post = state
        .notes
        .posts()
        .update_post(&actor, &id, PostUpdate { content, image })
        .await?;

    Ok(Json(PostDto::from(post)))
}

/// Delete a post and its comments
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let actor = actor(&auth);
    state.notes.posts().delete_post(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pull `content` and `image` out of a post form; other fields are ignored
async fn read_post_form(mut multipart: Multipart) -> ServerResult<(String, Option<ImageUpload>)> {
    let mut content = String::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("content") => content = field.text().await.map_err(invalid_form)?,
            Some("image") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(invalid_form)?;
                image = Some(ImageUpload {
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok((content, image))
}

fn invalid_form(err: MultipartError) -> ServerError {
    ServerError::BadRequest(format!("Invalid form data: {}", err.body_text()))
}
