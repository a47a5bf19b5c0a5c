use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use noteapp::config::{ConfigLoader, NoteAppConfig};
use noteapp::core::NoteManager;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

mod api;
mod cli;
mod config;
mod error;
mod state;

use crate::api::create_router;
use crate::cli::CliArgs;
use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Set up logging
    let filter = match cli_args.log_level {
        Some(ref level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::from_default_env(),
    }
    .add_directive("surrealdb_core=warn".parse()?)
    .add_directive("surrealdb=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting NoteApp server v{}", noteapp::VERSION);

    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    info!("Server configuration loaded");

    let notes_config = load_library_config(&server_config)?;

    // Logging is already set up above, so only storage is opened here
    let storage = noteapp::storage::create_storage_service(&notes_config).await?;
    let notes = NoteManager::new(Arc::from(storage), notes_config);
    info!("NoteApp services initialized");

    let app_state = AppState::new(notes, server_config.clone());

    if server_config.seed_demo_users
        && let Err(e) = app_state.auth_service.seed_demo_users(&app_state.notes).await
    {
        warn!("Failed to create demo users: {}", e);
    }

    let app = create_router(Arc::new(app_state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);
    if !server_config.allow_signup {
        info!("User signup is disabled");
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Library configuration: defaults, then the config file if one was given,
/// then `NOTEAPP_` environment variables
fn load_library_config(server_config: &ServerConfig) -> Result<NoteAppConfig> {
    let mut loader = ConfigLoader::new();

    match &server_config.config_file_path {
        Some(path) => {
            info!("Loading NoteApp configuration from {}", path.display());
            loader.load_file(path)?;
        }
        None => {
            loader.load_default_files();
        }
    }

    Ok(loader.load_env().extract()?)
}
