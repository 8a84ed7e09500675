//! Invoice read and sync-write operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{models::InvoiceRow, DbError};

/// Count invoices with `row_modified_on` inside the closed interval
/// `[from, to]`.
pub async fn count_modified_between(
    pool: &PgPool,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM invoices WHERE row_modified_on >= $1 AND row_modified_on <= $2",
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Fetch one page of invoices modified inside `[from, to]`, newest first.
pub async fn page_modified_between(
    pool: &PgPool,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    offset: i64,
    limit: i64,
) -> Result<Vec<InvoiceRow>, DbError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
        r#"
        SELECT invoice_no, posted_flag, customer_no, description, invoice_date,
               transaction_date, post_date, estimate_no, job_no, invoice_amount,
               customer_id, estimate_id, invoice_id, job_id,
               release_retainage_amount, original_release_retainage_amount,
               adjust_release_retainage_amount, adjust_amount_due,
               original_invoice_amount, row_unique_id, row_modified_on
        FROM invoices
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

/// Latest `row_modified_on` present locally — the import high-water mark.
/// `None` when the table is empty.
pub async fn max_modified_on(pool: &PgPool) -> Result<Option<DateTime<Utc>>, DbError> {
    let max = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
        "SELECT MAX(row_modified_on) FROM invoices",
    )
    .fetch_one(pool)
    .await?;

    Ok(max)
}

/// Insert an invoice, skipping rows whose `invoice_id` already exists.
///
/// Returns `true` when a row was actually written.
pub async fn insert_if_absent(pool: &PgPool, row: &InvoiceRow) -> Result<bool, DbError> {
    let result = sqlx::query(
        r#"
        INSERT INTO invoices
            (invoice_no, posted_flag, customer_no, description, invoice_date,
             transaction_date, post_date, estimate_no, job_no, invoice_amount,
             customer_id, estimate_id, invoice_id, job_id,
             release_retainage_amount, original_release_retainage_amount,
             adjust_release_retainage_amount, adjust_amount_due,
             original_invoice_amount, row_unique_id, row_modified_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21)
        ON CONFLICT (invoice_id) DO NOTHING
        "#,
    )
    .bind(&row.invoice_no)
    .bind(&row.posted_flag)
    .bind(&row.customer_no)
    .bind(&row.description)
    .bind(row.invoice_date)
    .bind(row.transaction_date)
    .bind(row.post_date)
    .bind(&row.estimate_no)
    .bind(&row.job_no)
    .bind(row.invoice_amount)
    .bind(row.customer_id)
    .bind(row.estimate_id)
    .bind(row.invoice_id)
    .bind(row.job_id)
    .bind(row.release_retainage_amount)
    .bind(row.original_release_retainage_amount)
    .bind(row.adjust_release_retainage_amount)
    .bind(row.adjust_amount_due)
    .bind(row.original_invoice_amount)
    .bind(row.row_unique_id)
    .bind(row.row_modified_on)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Insert or refresh an invoice by `invoice_id`.
pub async fn upsert(pool: &PgPool, row: &InvoiceRow) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO invoices
            (invoice_no, posted_flag, customer_no, description, invoice_date,
             transaction_date, post_date, estimate_no, job_no, invoice_amount,
             customer_id, estimate_id, invoice_id, job_id,
             release_retainage_amount, original_release_retainage_amount,
             adjust_release_retainage_amount, adjust_amount_due,
             original_invoice_amount, row_unique_id, row_modified_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21)
        ON CONFLICT (invoice_id) DO UPDATE SET
            invoice_no = EXCLUDED.invoice_no,
            posted_flag = EXCLUDED.posted_flag,
            customer_no = EXCLUDED.customer_no,
            description = EXCLUDED.description,
            invoice_date = EXCLUDED.invoice_date,
            transaction_date = EXCLUDED.transaction_date,
            post_date = EXCLUDED.post_date,
            estimate_no = EXCLUDED.estimate_no,
            job_no = EXCLUDED.job_no,
            invoice_amount = EXCLUDED.invoice_amount,
            customer_id = EXCLUDED.customer_id,
            estimate_id = EXCLUDED.estimate_id,
            job_id = EXCLUDED.job_id,
            release_retainage_amount = EXCLUDED.release_retainage_amount,
            original_release_retainage_amount = EXCLUDED.original_release_retainage_amount,
            adjust_release_retainage_amount = EXCLUDED.adjust_release_retainage_amount,
            adjust_amount_due = EXCLUDED.adjust_amount_due,
            original_invoice_amount = EXCLUDED.original_invoice_amount,
            row_unique_id = EXCLUDED.row_unique_id,
            row_modified_on = EXCLUDED.row_modified_on
        "#,
    )
    .bind(&row.invoice_no)
    .bind(&row.posted_flag)
    .bind(&row.customer_no)
    .bind(&row.description)
    .bind(row.invoice_date)
    .bind(row.transaction_date)
    .bind(row.post_date)
    .bind(&row.estimate_no)
    .bind(&row.job_no)
    .bind(row.invoice_amount)
    .bind(row.customer_id)
    .bind(row.estimate_id)
    .bind(row.invoice_id)
    .bind(row.job_id)
    .bind(row.release_retainage_amount)
    .bind(row.original_release_retainage_amount)
    .bind(row.adjust_release_retainage_amount)
    .bind(row.adjust_amount_due)
    .bind(row.original_invoice_amount)
    .bind(row.row_unique_id)
    .bind(row.row_modified_on)
    .execute(pool)
    .await?;

    Ok(())
}
