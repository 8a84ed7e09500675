//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   POST /sync/job-costs
//!   POST /sync/job-history
//!   GET  /invoices
//!   GET  /job-history
//!   GET  /job-costs
//!   GET  /health

pub mod error;
pub mod handlers;
pub mod pagination;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use db::DbPool;
use sync::{
    job_cost_pipeline, job_history_pipeline, Pipeline, PipelineConfig, SyncContext, UpstreamSource,
};

/// Shared state cloned into every handler: the pool handle plus the two
/// fixed sync pipelines.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub sync: SyncContext,
    pub job_cost_pipeline: Arc<Pipeline>,
    pub job_history_pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pool: DbPool, source: Arc<dyn UpstreamSource>) -> Self {
        let sync = SyncContext::new(pool.clone(), source);
        Self {
            pool,
            sync,
            job_cost_pipeline: Arc::new(job_cost_pipeline(PipelineConfig::default())),
            job_history_pipeline: Arc::new(job_history_pipeline(PipelineConfig::default())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sync/job-costs", post(handlers::pipelines::run_job_costs))
        .route("/sync/job-history", post(handlers::pipelines::run_job_history))
        .route("/invoices", get(handlers::invoices::list))
        .route("/job-history", get(handlers::job_history::list))
        .route("/job-costs", get(handlers::job_costs::list))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Bind `addr` and serve the API until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on {addr}");
    axum::serve(listener, router(state)).await
}

#[cfg(test)]
mod router_tests;
