//! Tarefas - a small task CRUD API gated by GitHub OAuth
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - Task CRUD endpoints (/tarefas, /tarefa/:id, ...)         │
//! │  - Current-user endpoint (/usuario)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Authorization Gate                          │
//! │  - Session verification / open fallback / 401               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Task Store                              │
//! │  - SQLite (sqlx)                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers for the gated task and user endpoints
//! - `auth`: GitHub OAuth flow, sessions, and the authorization gate
//! - `store`: SQLite task persistence
//! - `config`: Configuration management
//! - `error`: Error types

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod store;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// This struct is cloned for each request and contains
/// shared resources like the task store and HTTP client.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Task persistence
    pub store: Arc<store::TaskStore>,

    /// HTTP client for the GitHub OAuth exchange
    pub http_client: Arc<reqwest::Client>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect to the SQLite task store (runs migrations)
    /// 2. Build the HTTP client used for the OAuth exchange
    ///
    /// # Errors
    /// Returns error if any initialization step fails
    pub async fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        tracing::info!("Initializing application state...");

        let store = store::TaskStore::connect(&config.database.path)
            .await
            .map_err(|e| error::AppError::Config(format!("task store init failed: {e}")))?;
        tracing::info!("Task store connected");

        let http_client = reqwest::Client::builder()
            .user_agent("Tarefas/0.1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| error::AppError::Internal(e.to_string()))?;

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            http_client: Arc::new(http_client),
        })
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::trace::TraceLayer;

    let cors_layer = build_cors_layer(&state.config.cors);

    Router::new()
        .route("/", axum::routing::get(greeting))
        .merge(auth::auth_router())
        .merge(api::api_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

fn build_cors_layer(cors: &config::CorsConfig) -> tower_http::cors::CorsLayer {
    use axum::http::{HeaderValue, Method, header};
    use tower_http::cors::CorsLayer;

    if cors.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let mut origins = Vec::new();
    for origin in &cors.allowed_origins {
        match HeaderValue::from_str(origin.trim()) {
            Ok(value) => origins.push(value),
            Err(error) => {
                tracing::error!(%error, origin, "Invalid CORS origin; skipping");
            }
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn greeting() -> &'static str {
    "Bem-vindo à API de tarefas"
}
