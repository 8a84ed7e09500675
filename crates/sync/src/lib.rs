//! `sync` crate — the batch synchronization engine.
//!
//! Defines the `SyncJob` contract, the upstream source abstraction, the six
//! concrete import/reconcile jobs, and the `Pipeline` executor that runs an
//! ordered job list strictly sequentially with short-circuit-on-failure
//! semantics.

pub mod error;
pub mod source;
pub mod jobs;
pub mod pipeline;
pub mod mock;

pub use error::{PipelineError, SyncError};
pub use source::{HttpSource, UpstreamSource};
pub use jobs::{SyncContext, SyncJob, SyncStats};
pub use pipeline::{job_cost_pipeline, job_history_pipeline, Pipeline, PipelineConfig};

#[cfg(test)]
mod pipeline_tests;
