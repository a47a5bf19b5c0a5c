//! Signup, login and account endpoints

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    api::auth::{AuthContext, AuthResponse, LoginRequest, SignupRequest, actor},
    api::auth_service::SettingsUpdate,
    api::dto::{AccountResponse, UpdateAccountRequest, UserDto},
    error::{ApiJson, ServerError, ServerResult, bad_request},
    state::AppState,
};

/// User signup endpoint
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    summary = "Register a new user account",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Username already exists"),
        (status = 403, description = "Signup disabled"),
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> ServerResult<(StatusCode, Json<AuthResponse>)> {
    if !state.config.allow_signup {
        return Err(ServerError::Forbidden("User signup is disabled".to_string()));
    }

    if request.username.trim().is_empty() {
        return Err(bad_request("Username cannot be empty"));
    }

    let user = state
        .auth_service
        .create_user(&state.notes, &request.username, &request.password, request.email)
        .await?;

    let auth_response = state.auth_service.issue_token(&user)?;
    Ok((StatusCode::CREATED, Json(auth_response)))
}

/// User login endpoint
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    summary = "Authenticate user and get JWT token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ServerResult<Json<AuthResponse>> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ServerError::Auth(
            "Username and password are required".to_string(),
        ));
    }

    let (auth_response, user) = state
        .auth_service
        .authenticate(&state.notes, &request.username, &request.password)
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(auth_response))
}

/// Current account
#[utoipa::path(
    get,
    path = "/api/account",
    tag = "auth",
    responses(
        (status = 200, description = "The logged-in user", body = UserDto),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
) -> ServerResult<Json<UserDto>> {
    let actor = actor(&auth);
    let identity = actor.identity()?;

    let user = state.notes.users().get_user(&identity.id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Change username, email or password
#[utoipa::path(
    put,
    path = "/api/account",
    tag = "auth",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Settings saved", body = AccountResponse),
        (status = 400, description = "Invalid request data"),
        (status = 401, description = "Not logged in or wrong current password"),
        (status = 409, description = "Username already taken"),
    )
)]
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
    ApiJson(request): ApiJson<UpdateAccountRequest>,
) -> ServerResult<Json<AccountResponse>> {
    let actor = actor(&auth);

    let update = SettingsUpdate {
        username: request.username,
        email: request.email,
        current_password: request.current_password,
        new_password: request.new_password,
    };
    let user = state
        .auth_service
        .update_settings(&state.notes, &actor, update)
        .await?;

    let token = state.auth_service.issue_token(&user)?;
    Ok(Json(AccountResponse {
        user: UserDto::from(user),
        token: token.token,
        expires_at: token.expires_at,
    }))
}

/// Delete the caller's account according to the configured delete policy
#[utoipa::path(
    delete,
    path = "/api/account",
    tag = "auth",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not logged in"),
        (status = 409, description = "Account still has friends, posts or comments"),
    )
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthContext>>,
) -> ServerResult<StatusCode> {
    let actor = actor(&auth);
    let identity = actor.identity()?;

    state.notes.users().delete_user(&actor, &identity.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
