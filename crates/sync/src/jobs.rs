//! The `SyncJob` trait and the six concrete import/reconcile jobs.
//!
//! Import jobs pull records newer than the local high-water mark and insert
//! the ones not yet present. Reconcile jobs re-read a trailing window behind
//! the mark and upsert, catching upstream edits to rows already imported.
//! Both are idempotent, which is what makes at-least-once pipeline runs safe.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use db::{repository, DbPool};

use crate::source::UpstreamSource;
use crate::SyncError;

/// Everything a sync job needs to do its work.
#[derive(Clone)]
pub struct SyncContext {
    pub pool: DbPool,
    pub source: Arc<dyn UpstreamSource>,
}

impl SyncContext {
    pub fn new(pool: DbPool, source: Arc<dyn UpstreamSource>) -> Self {
        Self { pool, source }
    }
}

/// Counters returned by a completed job. Logged, not acted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Records the upstream source returned.
    pub fetched: usize,
    /// Rows actually written locally.
    pub written: usize,
}

/// The core job trait. The pipeline dispatches execution through this
/// trait object, one job at a time.
#[async_trait]
pub trait SyncJob: Send + Sync {
    /// Stable job name used in pipeline logs and error reports.
    fn name(&self) -> &str;

    async fn run(&self, ctx: &SyncContext) -> Result<SyncStats, SyncError>;
}

/// How far behind the local high-water mark a reconcile pass re-reads.
/// Upstream edits land with their original timestamps refreshed, so a
/// trailing day is enough to catch them without refetching the full table.
const RECONCILE_OVERLAP_HOURS: i64 = 24;

fn reconcile_since(watermark: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    watermark.map(|ts| ts - Duration::hours(RECONCILE_OVERLAP_HOURS))
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

pub struct ImportInvoices;

#[async_trait]
impl SyncJob for ImportInvoices {
    fn name(&self) -> &str {
        "import-invoices"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<SyncStats, SyncError> {
        let watermark = repository::invoices::max_modified_on(&ctx.pool).await?;
        let batch = ctx.source.fetch_invoices(watermark).await?;

        let mut written = 0;
        for row in &batch {
            if repository::invoices::insert_if_absent(&ctx.pool, row).await? {
                written += 1;
            }
        }

        info!(fetched = batch.len(), written, "imported invoices");
        Ok(SyncStats { fetched: batch.len(), written })
    }
}

pub struct ReconcileInvoices;

#[async_trait]
impl SyncJob for ReconcileInvoices {
    fn name(&self) -> &str {
        "reconcile-invoices"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<SyncStats, SyncError> {
        let watermark = repository::invoices::max_modified_on(&ctx.pool).await?;
        let batch = ctx.source.fetch_invoices(reconcile_since(watermark)).await?;

        for row in &batch {
            repository::invoices::upsert(&ctx.pool, row).await?;
        }

        info!(refreshed = batch.len(), "reconciled invoices");
        Ok(SyncStats { fetched: batch.len(), written: batch.len() })
    }
}

// ---------------------------------------------------------------------------
// Job costs
// ---------------------------------------------------------------------------

pub struct ImportJobCosts;

#[async_trait]
impl SyncJob for ImportJobCosts {
    fn name(&self) -> &str {
        "import-job-costs"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<SyncStats, SyncError> {
        let watermark = repository::job_costs::max_modified_on(&ctx.pool).await?;
        let batch = ctx.source.fetch_job_costs(watermark).await?;

        let mut written = 0;
        for record in &batch {
            if repository::job_costs::insert_if_absent(&ctx.pool, record).await? {
                written += 1;
            }
        }

        info!(fetched = batch.len(), written, "imported job costs");
        Ok(SyncStats { fetched: batch.len(), written })
    }
}

pub struct ReconcileJobCosts;

#[async_trait]
impl SyncJob for ReconcileJobCosts {
    fn name(&self) -> &str {
        "reconcile-job-costs"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<SyncStats, SyncError> {
        let watermark = repository::job_costs::max_modified_on(&ctx.pool).await?;
        let batch = ctx.source.fetch_job_costs(reconcile_since(watermark)).await?;

        for record in &batch {
            repository::job_costs::upsert(&ctx.pool, record).await?;
        }

        info!(refreshed = batch.len(), "reconciled job costs");
        Ok(SyncStats { fetched: batch.len(), written: batch.len() })
    }
}

// ---------------------------------------------------------------------------
// Job history
// ---------------------------------------------------------------------------

pub struct ImportJobHistory;

#[async_trait]
impl SyncJob for ImportJobHistory {
    fn name(&self) -> &str {
        "import-job-history"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<SyncStats, SyncError> {
        let watermark = repository::job_history::max_modified_on(&ctx.pool).await?;
        let batch = ctx.source.fetch_job_history(watermark).await?;

        let mut written = 0;
        for row in &batch {
            if repository::job_history::insert_if_absent(&ctx.pool, row).await? {
                written += 1;
            }
        }

        info!(fetched = batch.len(), written, "imported job history");
        Ok(SyncStats { fetched: batch.len(), written })
    }
}

pub struct ReconcileJobHistory;

#[async_trait]
impl SyncJob for ReconcileJobHistory {
    fn name(&self) -> &str {
        "reconcile-job-history"
    }

    async fn run(&self, ctx: &SyncContext) -> Result<SyncStats, SyncError> {
        let watermark = repository::job_history::max_modified_on(&ctx.pool).await?;
        let batch = ctx.source.fetch_job_history(reconcile_since(watermark)).await?;

        for row in &batch {
            repository::job_history::upsert(&ctx.pool, row).await?;
        }

        info!(refreshed = batch.len(), "reconciled job history");
        Ok(SyncStats { fetched: batch.len(), written: batch.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reconcile_since_is_none_for_empty_store() {
        assert_eq!(reconcile_since(None), None);
    }

    #[test]
    fn reconcile_since_trails_the_watermark_by_a_day() {
        let mark = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 14, 8, 0, 0).unwrap();
        assert_eq!(reconcile_since(Some(mark)), Some(expected));
    }
}
