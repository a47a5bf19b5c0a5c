//! Account creation, login and settings on top of the NoteApp user service

use noteapp::{
    NoteAppError,
    core::{Actor, NoteManager},
    models::User,
};

use crate::{
    api::auth::{AuthResponse, generate_jwt_token, hash_password, verify_password},
    error::{ServerError, ServerResult, bad_request},
};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Demo accounts created by [`AuthService::seed_demo_users`]
pub const DEMO_USERS: [(&str, &str, &str); 2] = [
    ("user1-id", "user1", "user1@example.com"),
    ("user2-id", "user2", "user2@example.com"),
];

/// Password shared by the demo accounts
pub const DEMO_PASSWORD: &str = "Password123!";

/// Changes requested through the account settings endpoint
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Authentication service
#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_secret: String,
    jwt_expiration_hours: u64,
    password_cost: u32,
}

impl AuthService {
    pub fn new(jwt_secret: String, jwt_expiration_hours: u64, password_cost: u32) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_hours,
            password_cost,
        }
    }

    /// Create a new user with a hashed password
    pub async fn create_user(
        &self,
        notes: &NoteManager,
        username: &str,
        password: &str,
        email: Option<String>,
    ) -> ServerResult<User> {
        validate_password(password)?;
        let password_hash = hash_password(password, self.password_cost)?;

        let user = notes
            .users()
            .register(User::new(username, normalize_email(email), password_hash))
            .await?;
        Ok(user)
    }

    /// Check credentials and issue a token
    pub async fn authenticate(
        &self,
        notes: &NoteManager,
        username: &str,
        password: &str,
    ) -> ServerResult<(AuthResponse, User)> {
        let invalid = || ServerError::Auth("Invalid username or password".to_string());

        let user = notes
            .users()
            .find_by_username(username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        let response = self.issue_token(&user)?;
        Ok((response, user))
    }

    /// Issue a token for an already verified user
    pub fn issue_token(&self, user: &User) -> ServerResult<AuthResponse> {
        let (token, expires_at) = generate_jwt_token(
            &user.id,
            &user.username,
            &self.jwt_secret,
            self.jwt_expiration_hours,
        )?;

        Ok(AuthResponse {
            token,
            user_id: user.id.clone(),
            username: user.username.clone(),
            expires_at,
        })
    }

    /// Apply username, email and password changes to the caller's account.
    ///
    /// A password change requires the current password.
    pub async fn update_settings(
        &self,
        notes: &NoteManager,
        actor: &Actor,
        update: SettingsUpdate,
    ) -> ServerResult<User> {
        let identity = actor.identity()?;
        let mut user = notes.users().get_user(&identity.id).await?;

        if let Some(username) = update.username {
            let username = username.trim();
            if username.is_empty() {
                return Err(NoteAppError::Validation("Username cannot be empty".to_string()).into());
            }
            user.username = username.to_string();
        }

        if let Some(email) = update.email {
            user.email = normalize_email(Some(email));
        }

        if let Some(new_password) = update.new_password {
            let current = update
                .current_password
                .ok_or_else(|| bad_request("The current password is required to set a new one"))?;
            if !verify_password(&current, &user.password_hash)? {
                return Err(ServerError::Auth("Current password is incorrect".to_string()));
            }
            validate_password(&new_password)?;
            user.password_hash = hash_password(&new_password, self.password_cost)?;
        }

        let updated = notes.users().save(user).await?;
        tracing::info!(user_id = %updated.id, "Account settings updated");
        Ok(updated)
    }

    /// Create the demo accounts unless they already exist
    pub async fn seed_demo_users(&self, notes: &NoteManager) -> ServerResult<usize> {
        let mut created = 0;
        for (id, username, email) in DEMO_USERS {
            if notes.users().find_by_username(username).await?.is_some() {
                continue;
            }

            let password_hash = hash_password(DEMO_PASSWORD, self.password_cost)?;
            let user = User::new(username, Some(email.to_string()), password_hash).with_id(id);
            notes.users().register(user).await?;
            created += 1;
        }

        if created > 0 {
            tracing::info!(created, "Demo users created");
        }
        Ok(created)
    }
}

fn validate_password(password: &str) -> ServerResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(bad_request(&format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Blank emails are stored as none
fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}
