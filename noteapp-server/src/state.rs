//! Application state management

use noteapp::core::NoteManager;

use crate::api::auth_service::AuthService;
use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// NoteApp services
    pub notes: NoteManager,

    /// Server configuration
    pub config: ServerConfig,

    /// Signup, login and account settings
    pub auth_service: AuthService,
}

impl AppState {
    /// Create new application state
    pub fn new(notes: NoteManager, config: ServerConfig) -> Self {
        let auth_service = AuthService::new(
            config.jwt_secret.clone(),
            config.jwt_expiration_hours,
            config.password_cost,
        );

        Self {
            notes,
            config,
            auth_service,
        }
    }
}
