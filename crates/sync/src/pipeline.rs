//! Pipeline execution.
//!
//! A `Pipeline` is an ordered list of jobs run strictly sequentially: each
//! job must complete, including its own database writes, before the next
//! starts. A job failing fatally (or exhausting the transient-retry budget)
//! aborts the pipeline; effects of completed jobs are not undone.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::jobs::{
    ImportInvoices, ImportJobCosts, ImportJobHistory, ReconcileInvoices, ReconcileJobCosts,
    ReconcileJobHistory, SyncContext, SyncJob,
};
use crate::{PipelineError, SyncError};

/// Tuning knobs for pipeline execution.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of times a transient job failure will be retried.
    pub max_retries: u32,
    /// Base delay for exponential back-off between retries.
    pub retry_base_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_base_delay: Duration::from_millis(100),
        }
    }
}

/// An ordered, non-branching list of sync jobs.
pub struct Pipeline {
    name: &'static str,
    jobs: Vec<Arc<dyn SyncJob>>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(name: &'static str, jobs: Vec<Arc<dyn SyncJob>>, config: PipelineConfig) -> Self {
        Self { name, jobs, config }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Job names in execution order.
    pub fn job_names(&self) -> Vec<&str> {
        self.jobs.iter().map(|job| job.name()).collect()
    }

    /// Run every job in order, stopping at the first failure.
    pub async fn run(&self, ctx: &SyncContext) -> Result<(), PipelineError> {
        info!("running pipeline '{}' ({} jobs)", self.name, self.jobs.len());

        for job in &self.jobs {
            self.run_with_retry(job.as_ref(), ctx).await?;
        }

        info!("pipeline '{}' completed", self.name);
        Ok(())
    }

    async fn run_with_retry(
        &self,
        job: &dyn SyncJob,
        ctx: &SyncContext,
    ) -> Result<(), PipelineError> {
        let mut attempts = 0u32;

        loop {
            match job.run(ctx).await {
                Ok(stats) => {
                    info!(
                        "job '{}' succeeded (fetched={}, written={})",
                        job.name(),
                        stats.fetched,
                        stats.written
                    );
                    return Ok(());
                }

                Err(SyncError::Transient(msg)) => {
                    attempts += 1;
                    if attempts > self.config.max_retries {
                        error!("job '{}' exhausted retries: {}", job.name(), msg);
                        return Err(PipelineError::RetriesExhausted {
                            job: job.name().to_owned(),
                            source: SyncError::Transient(msg),
                        });
                    }

                    let delay = self.config.retry_base_delay * 2u32.pow(attempts.saturating_sub(1));

                    warn!(
                        "job '{}' transient error (attempt {}/{}), retrying in {:?}: {}",
                        job.name(),
                        attempts,
                        self.config.max_retries,
                        delay,
                        msg
                    );

                    tokio::time::sleep(delay).await;
                }

                Err(err) => {
                    error!("job '{}' failed: {}", job.name(), err);
                    return Err(PipelineError::JobFailed {
                        job: job.name().to_owned(),
                        source: err,
                    });
                }
            }
        }
    }
}

/// The fixed job-cost pipeline. Invoice stages must complete before
/// job-cost stages; upstream job-cost rows may reference invoices.
pub fn job_cost_pipeline(config: PipelineConfig) -> Pipeline {
    Pipeline::new(
        "job-cost-sync",
        vec![
            Arc::new(ImportInvoices),
            Arc::new(ReconcileInvoices),
            Arc::new(ImportJobCosts),
            Arc::new(ReconcileJobCosts),
        ],
        config,
    )
}

/// The fixed job-history pipeline.
pub fn job_history_pipeline(config: PipelineConfig) -> Pipeline {
    Pipeline::new(
        "job-history-sync",
        vec![Arc::new(ImportJobHistory), Arc::new(ReconcileJobHistory)],
        config,
    )
}
