//! Authentication for the NoteApp API
//!
//! A bearer token is optional. Requests without one run as
//! [`Actor::Anonymous`] and the services decide what an anonymous caller may
//! do. A token that is invalid, or whose account has since been deleted, is
//! rejected outright.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use noteapp::{NoteAppError, core::Actor};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ServerError, state::AppState};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username
    pub username: String,
    /// Issued at timestamp
    pub iat: usize,
    /// Expiration timestamp
    pub exp: usize,
}

/// User authentication context
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub username: String,
}

impl AuthContext {
    pub fn actor(&self) -> Actor {
        Actor::user(&self.user_id, &self.username)
    }
}

/// The caller as seen by the services
pub fn actor(auth: &Option<Extension<AuthContext>>) -> Actor {
    auth.as_ref()
        .map(|Extension(context)| context.actor())
        .unwrap_or_default()
}

/// User signup request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Username (must be unique)
    pub username: String,
    /// Password (will be hashed)
    pub password: String,
    /// Optional email
    pub email: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authentication response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// JWT token
    pub token: String,
    pub user_id: String,
    pub username: String,
    /// Token expiration timestamp
    pub expires_at: i64,
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if let Some(auth_header) = headers.typed_get::<Authorization<Bearer>>() {
        let claims = validate_jwt_token(auth_header.token(), &state.config.jwt_secret)?;

        let user = match state.notes.users().get_user(&claims.user_id).await {
            Ok(user) => user,
            Err(NoteAppError::NotFound { .. }) => {
                tracing::debug!(user_id = %claims.user_id, "Token for deleted account");
                return Err(ServerError::Auth("Account no longer exists".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(user_id = %user.id, "Authenticated request");
        request.extensions_mut().insert(AuthContext {
            user_id: user.id,
            username: user.username,
        });
    }

    Ok(next.run(request).await)
}

/// Validate a JWT token and return the authentication context
pub fn validate_jwt_token(token: &str, secret: &str) -> Result<AuthContext, ServerError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| ServerError::Auth(format!("Invalid token: {}", e)))?;

    Ok(AuthContext {
        user_id: token_data.claims.sub,
        username: token_data.claims.username,
    })
}

/// Generate a JWT token for a user
pub fn generate_jwt_token(
    user_id: &str,
    username: &str,
    secret: &str,
    expiration_hours: u64,
) -> Result<(String, i64), ServerError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let exp = now + (expiration_hours * 3600) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now,
        exp,
    };

    let encoding_key = EncodingKey::from_secret(secret.as_ref());
    let token = encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| ServerError::Internal(format!("Failed to generate token: {}", e)))?;

    Ok((token, exp as i64))
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, ServerError> {
    bcrypt::hash(password, cost)
        .map_err(|e| ServerError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServerError> {
    bcrypt::verify(password, hash)
        .map_err(|e| ServerError::Internal(format!("Failed to verify password: {}", e)))
}
