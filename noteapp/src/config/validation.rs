//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &NoteAppConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_friends_config(&config.friends)?;
    validate_posts_config(&config.posts)?;

    Ok(())
}

/// Validate storage configuration.
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data directory cannot be empty".to_string(),
        ));
    }

    if config.surrealdb.namespace.is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB namespace cannot be empty".to_string(),
        ));
    }
    if config.surrealdb.database.is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB database cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_friends_config(config: &FriendsConfig) -> Result<(), ConfigError> {
    if config.max_search_results == 0 {
        return Err(ConfigError::ValidationError(
            "friends.max_search_results must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

/// Validate post limits.
fn validate_posts_config(config: &PostsConfig) -> Result<(), ConfigError> {
    if config.max_image_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "posts.max_image_bytes must be greater than zero".to_string(),
        ));
    }
    if config.max_content_length == 0 {
        return Err(ConfigError::ValidationError(
            "posts.max_content_length must be greater than zero".to_string(),
        ));
    }
    if let Some(bad) = config
        .allowed_image_types
        .iter()
        .find(|t| !t.starts_with("image/"))
    {
        return Err(ConfigError::ValidationError(format!(
            "posts.allowed_image_types entry '{}' is not an image type",
            bad
        )));
    }

    Ok(())
}
