//! Contacts Backend
//!
//! A REST backend for a contacts book with SQLite persistence.

mod api;
mod config;
mod db;
mod errors;
mod guard;
mod models;
mod schemas;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{ContactStore, SqliteContactStore};
use errors::AppError;

/// Application state shared across all handlers.
pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Contacts Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await.map_err(|e| {
        tracing::error!("Database connection failed: {}", e);
        e
    })?;
    tracing::info!("Database connection successful");

    let state = AppState {
        store: Arc::new(SqliteContactStore::new(pool)),
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
pub fn create_router<S: ContactStore>(state: AppState<S>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes addressing a single contact; the id guard runs first
    let contact_routes = Router::new()
        .route(
            "/contacts/{id}",
            get(api::get_contact::<S>)
                .put(api::update_contact::<S>)
                .delete(api::delete_contact::<S>),
        )
        .route("/contacts/{id}/favorite", patch(api::update_favorite::<S>))
        .route_layer(middleware::from_fn(guard::is_valid_id));

    let api_routes = Router::new()
        .route(
            "/contacts",
            get(api::list_contacts::<S>).post(api::create_contact::<S>),
        )
        .merge(contact_routes);

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .fallback(route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Fallback for unmatched routes.
async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
