//! Test doubles for the sync engine.
//!
//! Useful in unit and integration tests where real jobs or a real upstream
//! endpoint are either unavailable or irrelevant.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use db::models::{InvoiceRow, JobCostRecord, JobHistoryRow};

use crate::jobs::{SyncContext, SyncJob, SyncStats};
use crate::source::UpstreamSource;
use crate::SyncError;

/// Behaviour injected into `MockJob` at construction time.
pub enum MockBehaviour {
    /// Succeed with the given stats.
    Succeed(SyncStats),
    /// Fail transiently on the first `n` calls, then succeed.
    TransientTimes(u32),
    /// Always fail with a transient error.
    FailTransient(String),
    /// Always fail with a fatal error.
    FailFatal(String),
}

/// A mock job that records every invocation in a shared journal so tests
/// can assert cross-job ordering.
pub struct MockJob {
    name: String,
    behaviour: MockBehaviour,
    journal: Arc<Mutex<Vec<String>>>,
    calls: Mutex<u32>,
}

impl MockJob {
    pub fn new(
        name: impl Into<String>,
        behaviour: MockBehaviour,
        journal: Arc<Mutex<Vec<String>>>,
    ) -> Self {
        Self {
            name: name.into(),
            behaviour,
            journal,
            calls: Mutex::new(0),
        }
    }

    /// Number of times this job has been run.
    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SyncJob for MockJob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _ctx: &SyncContext) -> Result<SyncStats, SyncError> {
        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        self.journal.lock().unwrap().push(self.name.clone());

        match &self.behaviour {
            MockBehaviour::Succeed(stats) => Ok(*stats),
            MockBehaviour::TransientTimes(n) => {
                if attempt <= *n {
                    Err(SyncError::Transient(format!(
                        "induced transient failure {attempt}"
                    )))
                } else {
                    Ok(SyncStats::default())
                }
            }
            MockBehaviour::FailTransient(msg) => Err(SyncError::Transient(msg.clone())),
            MockBehaviour::FailFatal(msg) => Err(SyncError::Fatal(msg.clone())),
        }
    }
}

/// An `UpstreamSource` that always returns empty batches. Lets tests build
/// a complete `SyncContext` without any upstream endpoint.
pub struct EmptySource;

#[async_trait]
impl UpstreamSource for EmptySource {
    async fn fetch_invoices(
        &self,
        _since: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRow>, SyncError> {
        Ok(Vec::new())
    }

    async fn fetch_job_costs(
        &self,
        _since: Option<DateTime<Utc>>,
    ) -> Result<Vec<JobCostRecord>, SyncError> {
        Ok(Vec::new())
    }

    async fn fetch_job_history(
        &self,
        _since: Option<DateTime<Utc>>,
    ) -> Result<Vec<JobHistoryRow>, SyncError> {
        Ok(Vec::new())
    }
}
