//! Sync-trigger handlers.
//!
//! Each awaits its fixed pipeline to completion before responding; effects
//! of jobs that finished before a failure are kept (the jobs are
//! idempotent, so the next run converges).

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::AppState;

/// `POST /sync/job-costs` — import and reconcile invoices, then job costs.
pub async fn run_job_costs(
    State(state): State<AppState>,
) -> Result<Json<&'static str>, ApiError> {
    state.job_cost_pipeline.run(&state.sync).await?;
    Ok(Json("completed!"))
}

/// `POST /sync/job-history` — import and reconcile job history.
pub async fn run_job_history(
    State(state): State<AppState>,
) -> Result<Json<&'static str>, ApiError> {
    state.job_history_pipeline.run(&state.sync).await?;
    Ok(Json("completed!"))
}
