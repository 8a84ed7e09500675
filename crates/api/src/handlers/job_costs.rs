//! Paginated job-cost reads.

use axum::extract::{Query, State};
use axum::Json;
use tracing::debug;

use db::models::JobCostRow;
use db::repository::job_costs as cost_repo;

use super::ListResponse;
use crate::error::ApiError;
use crate::pagination::{PageQuery, Pagination};
use crate::AppState;

/// `GET /job-costs` — the full job-cost listing ordered by descending `id`.
/// Date parameters, if supplied, are ignored; only pagination applies.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListResponse<JobCostRow>>, ApiError> {
    let pagination = Pagination::from_query(&query)?;

    let total = cost_repo::count_all(&state.pool).await?;
    debug!(total, "job cost listing requested");

    let data = if total > 0 {
        let rows = cost_repo::page_by_id_desc(
            &state.pool,
            pagination.skip,
            i64::from(pagination.limit),
        )
        .await?;
        debug!("sample of fetched page: {:?}", &rows[..rows.len().min(5)]);
        rows
    } else {
        Vec::new()
    };

    debug!(
        total,
        page = pagination.page,
        rows = data.len(),
        "job cost response assembled"
    );

    Ok(Json(ListResponse {
        data,
        total,
        page: pagination.page,
        limit: pagination.limit,
    }))
}
