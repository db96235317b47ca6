//! Sentinel Shield Threat Assessment Server
//!
//! HTTP transport for the structured threat-assessment pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  SENTINEL SHIELD SERVER                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────────┐   ┌──────────────────┐  │
//! │  │  API      │──▶│  Assessment    │──▶│  Reasoning       │  │
//! │  │  (Axum)   │   │  Pipeline      │   │  Oracle (HTTP)   │  │
//! │  └─────┬─────┘   └───────▲────────┘   └──────────────────┘  │
//! │        ▼                 │                                  │
//! │  ┌───────────┐   ┌───────┴────────┐                         │
//! │  │  Job      │──▶│  Progress      │                         │
//! │  │  Registry │   │  Reporter      │                         │
//! │  └───────────┘   └────────────────┘                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod jobs;
mod error;


use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

use sentinel_core::{AssessmentPipeline, HttpOracle};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "sentinel_server=debug,sentinel_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Sentinel Shield Server starting ({})...", config.environment);
    tracing::info!("Oracle: {} (model {})", config.oracle.base_url, config.oracle.model);
    if config.oracle.api_key.is_empty() {
        if config.is_production() {
            anyhow::bail!("ORACLE_API_KEY must be set in production");
        }
        tracing::warn!("ORACLE_API_KEY is not set - oracle requests will be unauthenticated");
    }

    let oracle = HttpOracle::new(config.oracle.clone())?;

    // Build application state
    let state = AppState {
        pipeline: AssessmentPipeline::new(Arc::new(oracle)),
        jobs: Arc::new(jobs::JobRegistry::new(config.progress.clone(), config.job_retention())),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: AssessmentPipeline,
    pub jobs: Arc<jobs::JobRegistry>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))

        // Assessments
        .route("/api/v1/assessments/run", post(handlers::assessments::run))
        .route("/api/v1/assessments", post(handlers::assessments::create))
        .route(
            "/api/v1/assessments/:id",
            get(handlers::assessments::get).delete(handlers::assessments::cancel),
        )

        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
