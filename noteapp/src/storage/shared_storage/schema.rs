//! Schema initialization for SharedStorage

use crate::storage::errors::StorageError;
use surrealdb::{Connection, Surreal};

/// Initialize the SharedStorage schema with the NoteApp tables
pub async fn initialize_schema<C>(client: &Surreal<C>) -> Result<(), StorageError>
where
    C: Connection,
{
    let user_table_query = r#"
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS
        COMMENT "Registered user accounts";

        DEFINE FIELD IF NOT EXISTS username ON user TYPE string;
        DEFINE FIELD IF NOT EXISTS password_hash ON user TYPE string;
        DEFINE FIELD IF NOT EXISTS created_at ON user TYPE datetime DEFAULT time::now();
        DEFINE FIELD IF NOT EXISTS updated_at ON user TYPE datetime VALUE time::now();

        DEFINE INDEX IF NOT EXISTS user_username_idx ON user FIELDS username UNIQUE;
    "#;

    // The record key already encodes the ordered pair; the unique index keeps
    // the invariant even for records written with any other key.
    let friendship_table_query = r#"
        DEFINE TABLE IF NOT EXISTS friendship SCHEMALESS
        COMMENT "Directed friend links, one per ordered pair";

        DEFINE FIELD IF NOT EXISTS user_id ON friendship TYPE string;
        DEFINE FIELD IF NOT EXISTS friend_id ON friendship TYPE string;
        DEFINE FIELD IF NOT EXISTS created_at ON friendship TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS friendship_pair_idx ON friendship FIELDS user_id, friend_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS friendship_friend_idx ON friendship FIELDS friend_id;
    "#;

    let post_table_query = r#"
        DEFINE TABLE IF NOT EXISTS post SCHEMALESS
        COMMENT "User posts with optional inline image";

        DEFINE FIELD IF NOT EXISTS user_id ON post TYPE string;
        DEFINE FIELD IF NOT EXISTS content ON post TYPE string;
        DEFINE FIELD IF NOT EXISTS created_at ON post TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS post_user_idx ON post FIELDS user_id;
        DEFINE INDEX IF NOT EXISTS post_created_at_idx ON post FIELDS created_at;
    "#;

    let comment_table_query = r#"
        DEFINE TABLE IF NOT EXISTS comment SCHEMALESS
        COMMENT "Comments attached to posts";

        DEFINE FIELD IF NOT EXISTS post_id ON comment TYPE string;
        DEFINE FIELD IF NOT EXISTS user_id ON comment TYPE string;
        DEFINE FIELD IF NOT EXISTS content ON comment TYPE string;
        DEFINE FIELD IF NOT EXISTS created_at ON comment TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS comment_post_idx ON comment FIELDS post_id;
        DEFINE INDEX IF NOT EXISTS comment_user_idx ON comment FIELDS user_id;
    "#;

    execute_schema_query(client, user_table_query, "user table").await?;
    execute_schema_query(client, friendship_table_query, "friendship table").await?;
    execute_schema_query(client, post_table_query, "post table").await?;
    execute_schema_query(client, comment_table_query, "comment table").await?;

    tracing::info!("SharedStorage schema initialized successfully");
    Ok(())
}

/// Execute a schema query and surface statement errors
async fn execute_schema_query<C>(
    client: &Surreal<C>,
    query: &str,
    description: &str,
) -> Result<(), StorageError>
where
    C: Connection,
{
    client
        .query(query)
        .await
        .and_then(|response| response.check())
        .map_err(|e| StorageError::Query(format!("Failed to create {}: {}", description, e)))?;

    tracing::debug!("Created {} successfully", description);
    Ok(())
}

