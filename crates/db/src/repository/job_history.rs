//! Job-history read and sync-write operations.
//!
//! The upstream system calls this table "Order"; locally it is
//! `job_history`. Rows are identified by their upstream `row_unique_id`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{models::JobHistoryRow, DbError};

/// Count job-history rows with `row_modified_on` inside `[from, to]`.
pub async fn count_modified_between(
    pool: &PgPool,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM job_history WHERE row_modified_on >= $1 AND row_modified_on <= $2",
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Fetch one page of job-history rows modified inside `[from, to]`,
/// newest first.
pub async fn page_modified_between(
    pool: &PgPool,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    offset: i64,
    limit: i64,
) -> Result<Vec<JobHistoryRow>, DbError> {
    let rows = sqlx::query_as::<_, JobHistoryRow>(
        r#"
        SELECT job_no, earn_type_no, cost_class_no, date_booked, transaction_no,
               date_posted, cost, units, quantity, vendor_no, job_id, vendor_id,
               datetime_posted, row_unique_id, row_modified_on
        FROM job_history
        WHERE row_modified_on >= $1 AND row_modified_on <= $2
        ORDER BY row_modified_on DESC
        OFFSET $3 LIMIT $4
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Latest `row_modified_on` present locally. `None` when the table is empty.
pub async fn max_modified_on(pool: &PgPool) -> Result<Option<DateTime<Utc>>, DbError> {
    let max = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
        "SELECT MAX(row_modified_on) FROM job_history",
    )
    .fetch_one(pool)
    .await?;

    Ok(max)
}

/// Insert a job-history row, skipping rows whose `row_unique_id` already
/// exists. Returns `true` when a row was actually written.
pub async fn insert_if_absent(pool: &PgPool, row: &JobHistoryRow) -> Result<bool, DbError> {
    let result = sqlx::query(
        r#"
        INSERT INTO job_history
            (job_no, earn_type_no, cost_class_no, date_booked, transaction_no,
             date_posted, cost, units, quantity, vendor_no, job_id, vendor_id,
             datetime_posted, row_unique_id, row_modified_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        ON CONFLICT (row_unique_id) DO NOTHING
        "#,
    )
    .bind(&row.job_no)
    .bind(&row.earn_type_no)
    .bind(&row.cost_class_no)
    .bind(row.date_booked)
    .bind(row.transaction_no)
    .bind(row.date_posted)
    .bind(row.cost)
    .bind(row.units)
    .bind(row.quantity)
    .bind(&row.vendor_no)
    .bind(row.job_id)
    .bind(row.vendor_id)
    .bind(row.datetime_posted)
    .bind(row.row_unique_id)
    .bind(row.row_modified_on)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Insert or refresh a job-history row by `row_unique_id`.
pub async fn upsert(pool: &PgPool, row: &JobHistoryRow) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO job_history
            (job_no, earn_type_no, cost_class_no, date_booked, transaction_no,
             date_posted, cost, units, quantity, vendor_no, job_id, vendor_id,
             datetime_posted, row_unique_id, row_modified_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        ON CONFLICT (row_unique_id) DO UPDATE SET
            job_no = EXCLUDED.job_no,
            earn_type_no = EXCLUDED.earn_type_no,
            cost_class_no = EXCLUDED.cost_class_no,
            date_booked = EXCLUDED.date_booked,
            transaction_no = EXCLUDED.transaction_no,
            date_posted = EXCLUDED.date_posted,
            cost = EXCLUDED.cost,
            units = EXCLUDED.units,
            quantity = EXCLUDED.quantity,
            vendor_no = EXCLUDED.vendor_no,
            job_id = EXCLUDED.job_id,
            vendor_id = EXCLUDED.vendor_id,
            datetime_posted = EXCLUDED.datetime_posted,
            row_modified_on = EXCLUDED.row_modified_on
        "#,
    )
    .bind(&row.job_no)
    .bind(&row.earn_type_no)
    .bind(&row.cost_class_no)
    .bind(row.date_booked)
    .bind(row.transaction_no)
    .bind(row.date_posted)
    .bind(row.cost)
    .bind(row.units)
    .bind(row.quantity)
    .bind(&row.vendor_no)
    .bind(row.job_id)
    .bind(row.vendor_id)
    .bind(row.datetime_posted)
    .bind(row.row_unique_id)
    .bind(row.row_modified_on)
    .execute(pool)
    .await?;

    Ok(())
}
