pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::dispatch::PersistenceDispatcher;
use crate::services::sessions::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// State whose sessions persist outcomes through `db` on the current runtime.
    /// Hosted sessions idle for longer than `session_idle_ttl` are dropped.
    pub fn new(db: Arc<Database>, session_idle_ttl: chrono::Duration) -> Self {
        let dispatcher = PersistenceDispatcher::new(db.clone(), tokio::runtime::Handle::current());
        Self {
            db,
            sessions: Arc::new(SessionRegistry::new(Arc::new(dispatcher), session_idle_ttl)),
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let app = router(AppState::new(Arc::new(db), config.session_idle_ttl()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// All API routes, without the HTTP middleware layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Deck routes
        .route("/api/decks", get(routes::decks::list).post(routes::decks::create))
        .route(
            "/api/decks/:id",
            get(routes::decks::get).delete(routes::decks::delete),
        )
        .route("/api/decks/:id/due", get(routes::decks::due))
        .route("/api/decks/:id/stats", get(routes::decks::stats))
        // Item routes
        .route(
            "/api/decks/:id/items",
            get(routes::items::list).post(routes::items::create),
        )
        // Study routes
        .route("/api/study/review", post(routes::study::review))
        // Session routes
        .route("/api/sessions", post(routes::sessions::start))
        .route(
            "/api/sessions/:id",
            get(routes::sessions::get).delete(routes::sessions::delete),
        )
        .route("/api/sessions/:id/result", post(routes::sessions::record_result))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
