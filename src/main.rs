//! Community Events Back-Office Backend
//!
//! REST backend with SQLite persistence and local-disk file uploads served
//! statically under /uploads.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod storage;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use storage::UploadStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub uploads: Arc<UploadStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Community Back-Office Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Uploads directory: {:?}", config.uploads_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize the upload store
    let uploads = Arc::new(UploadStore::open(&config.uploads_dir).await?);

    // Create application state
    let state = AppState {
        repo,
        uploads,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Events
        .route("/events", get(api::list_events))
        .route("/events", post(api::create_event))
        .route("/events/delete/{id}", delete(api::delete_event))
        // Admins
        .route("/admins", get(api::list_admins))
        .route("/admins", post(api::create_admin))
        .route("/admins/edit/{id}", post(api::update_admin))
        .route("/admins/delete/{id}", delete(api::delete_admin))
        .route("/login", post(api::login))
        // Contacts
        .route("/contact", get(api::list_contacts))
        .route("/contact", post(api::create_contact))
        .route("/contact/{id}", post(api::update_contact))
        .route("/contact/delete/{id}", delete(api::delete_contact))
        // Teams
        .route("/team", get(api::list_teams))
        .route("/team", post(api::create_team))
        .route("/team/{id}", put(api::update_team))
        .route("/team/{id}", delete(api::delete_team));

    // System data lives outside the /api prefix
    let system_data_routes = Router::new()
        .route("/system-data", get(api::get_system_data))
        .route("/system-data", post(api::upsert_system_data));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(system_data_routes)
        .merge(health_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.uploads_dir))
        // Mirror the 50 MB per-file upload cap at the request level
        .layer(DefaultBodyLimit::max(storage::MAX_FILE_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
