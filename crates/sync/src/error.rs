//! Sync-level error types.

use thiserror::Error;

/// Errors returned by a job's `run` method.
///
/// The pipeline uses the variant to decide retry behaviour:
/// - `Transient` — the job is re-run with exponential back-off.
/// - `Fatal` and `Database` — the pipeline aborts immediately.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Upstream I/O failure worth retrying.
    #[error("transient sync error: {0}")]
    Transient(String),

    /// Contract or decode failure; no retry should be attempted.
    #[error("fatal sync error: {0}")]
    Fatal(String),

    /// Persistence error from the db crate.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}

/// Errors produced by running a pipeline; names the job that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A job failed fatally; no later job was executed.
    #[error("job '{job}' failed: {source}")]
    JobFailed {
        job: String,
        source: SyncError,
    },

    /// A job's transient failures exhausted the retry budget.
    #[error("job '{job}' exceeded retry limit: {source}")]
    RetriesExhausted {
        job: String,
        source: SyncError,
    },
}
