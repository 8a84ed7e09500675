//! Paginated, date-filtered invoice reads.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use db::models::InvoiceRow;
use db::repository::invoices as invoice_repo;

use super::{parse_date_param, ListResponse};
use crate::error::ApiError;
use crate::pagination::Pagination;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// `GET /invoices` — invoices with `row_modified_on` inside
/// `[fromDate, toDate]`, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<InvoiceQuery>,
) -> Result<Json<ListResponse<InvoiceRow>>, ApiError> {
    let from = parse_date_param("fromDate", query.from_date.as_deref())?;
    let to = parse_date_param("toDate", query.to_date.as_deref())?;
    let pagination = Pagination::resolve(query.page, query.limit)?;

    let total = invoice_repo::count_modified_between(&state.pool, from, to).await?;

    let data = if total > 0 {
        invoice_repo::page_modified_between(
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
