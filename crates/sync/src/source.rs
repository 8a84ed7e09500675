//! The upstream record source — the boundary every sync job pulls through.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;

use db::models::{InvoiceRow, JobCostRecord, JobHistoryRow};

use crate::SyncError;

/// A source of upstream ledger records.
///
/// Each fetch returns the full batch of records with `row_modified_on`
/// strictly newer than `since` (all records when `None`). Implementations
/// must be safe to call from concurrent pipeline runs.
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    async fn fetch_invoices(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRow>, SyncError>;

    async fn fetch_job_costs(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<JobCostRecord>, SyncError>;

    async fn fetch_job_history(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<JobHistoryRow>, SyncError>;
}

/// `UpstreamSource` backed by the ledger's REST export endpoints:
/// `GET {base}/export/{collection}[?modifiedSince=…]`, JSON array body,
/// optional bearer token.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpSource {
    /// Build a source against `base_url`. Export batches can be large, so
    /// the request timeout is generous.
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| SyncError::Fatal(format!("failed to build http client: {e}")))?;

        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_token,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<T>, SyncError> {
        let url = export_url(&self.base_url, collection, since);
        debug!("fetching upstream batch from {url}");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::Transient(format!("upstream request failed: {e}")))?;

        let status = response.status();
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SyncError::Transient(format!(
                "upstream returned {status} for {collection}"
            )));
        }
        if !status.is_success() {
            return Err(SyncError::Fatal(format!(
                "upstream returned {status} for {collection}"
            )));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SyncError::Fatal(format!("invalid upstream payload for {collection}: {e}")))
    }
}

#[async_trait]
impl UpstreamSource for HttpSource {
    async fn fetch_invoices(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<InvoiceRow>, SyncError> {
        self.fetch("invoices", since).await
    }

    async fn fetch_job_costs(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<JobCostRecord>, SyncError> {
        self.fetch("job-costs", since).await
    }

    async fn fetch_job_history(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<JobHistoryRow>, SyncError> {
        self.fetch("job-history", since).await
    }
}

fn export_url(base: &str, collection: &str, since: Option<DateTime<Utc>>) -> String {
    match since {
        Some(ts) => format!(
            "{base}/export/{collection}?modifiedSince={}",
            ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        None => format!("{base}/export/{collection}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn export_url_without_watermark_has_no_query() {
        assert_eq!(
            export_url("https://ledger.example.com", "invoices", None),
            "https://ledger.example.com/export/invoices"
        );
    }

    #[test]
    fn export_url_with_watermark_appends_modified_since() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 31, 12, 30, 0).unwrap();
        assert_eq!(
            export_url("https://ledger.example.com", "job-costs", Some(ts)),
            "https://ledger.example.com/export/job-costs?modifiedSince=2024-01-31T12:30:00Z"
        );
    }

    #[test]
    fn http_source_strips_trailing_slash() {
        let source = HttpSource::new("https://ledger.example.com/", None).unwrap();
        assert_eq!(source.base_url, "https://ledger.example.com");
    }
}
