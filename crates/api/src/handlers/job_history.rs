//! Paginated, date-filtered job-history reads.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use db::models::JobHistoryRow;
use db::repository::job_history as history_repo;

use super::{parse_date_param, ListResponse};
use crate::error::ApiError;
use crate::pagination::Pagination;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHistoryQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// `GET /job-history` — job-history rows with `row_modified_on` inside
/// `[fromDate, toDate]`, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<JobHistoryQuery>,
) -> Result<Json<ListResponse<JobHistoryRow>>, ApiError> {
    let from = parse_date_param("fromDate", query.from_date.as_deref())?;
    let to = parse_date_param("toDate", query.to_date.as_deref())?;
    let pagination = Pagination::resolve(query.page, query.limit)?;

    let total = history_repo::count_modified_between(&state.pool, from, to).await?;

    let data = if total > 0 {
        history_repo::page_modified_between(
            &state.pool,
            from,
            to,
            pagination.skip,
            i64::from(pagination.limit),
        )
        .await?
    } else {
        Vec::new()
    };

    Ok(Json(ListResponse {
        data,
        total,
        page: pagination.page,
        limit: pagination.limit,
    }))
}
