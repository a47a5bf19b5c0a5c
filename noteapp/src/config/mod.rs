//! Configuration system for NoteApp.
//!
//! Configuration is layered: built-in defaults, then an optional TOML/YAML/JSON
//! file, then `NOTEAPP_` environment variables. Nested keys are separated by a
//! double underscore, e.g. `NOTEAPP_USERS__DELETE_POLICY=cascade`.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "noteapp.toml",
    "noteapp.yaml",
    "noteapp.yml",
    "noteapp.json",
    ".noteapp/config.toml",
    ".noteapp/config.yaml",
    ".noteapp/config.yml",
    ".noteapp/config.json",
];

/// Environment variable prefix for NoteApp configuration
pub const ENV_PREFIX: &str = "NOTEAPP_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
