//! StudyPath Analytics Service
//!
//! Computes derived learning-performance metrics for students and serves
//! them through a single query endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  STUDYPATH ANALYTICS                      │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌─────────────────────────────────────┐   │
//! │  │  API     │   │  Pipeline (per request)             │   │
//! │  │  (Axum)  │──▶│  derive ─▶ categorize ─▶ predict    │   │
//! │  └────┬─────┘   └─────────────────────────────────────┘   │
//! │       │                                                   │
//! │       ▼                                                   │
//! │  ┌──────────────┐      fetch failed?      ┌────────────┐  │
//! │  │ Student store │ ──────────────────────▶│ Synthetic  │  │
//! │  │ (HTTP, opt.)  │                        │ generator  │  │
//! │  └──────────────┘                         └────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod models;
mod source;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use source::{store::StoreClient, DataSource};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studypath_analytics=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("StudyPath Analytics starting...");

    // Build the data-source handle once; requests receive it explicitly
    // through state rather than via a process-global connection
    let source = match &config.store_url {
        Some(url) => {
            tracing::info!(store = %url, "student store configured");
            DataSource::Store(StoreClient::new(
                url.clone(),
                Duration::from_secs(config.store_timeout_secs),
            ))
        }
        None => {
            tracing::warn!("STORE_URL not set, every request will serve synthetic data");
            DataSource::Unavailable {
                reason: "STORE_URL not configured".to_string(),
            }
        }
    };
    tracing::info!(
        mode = source.describe(),
        environment = %config.environment,
        "data source ready"
    );

    // Build application state
    let state = AppState {
        source: Arc::new(source),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server exited")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<DataSource>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/analytics", get(handlers::analytics::get_analytics))
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
