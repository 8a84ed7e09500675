//! Job-cost read and sync-write operations.
//!
//! Listings of this table are unfiltered and ordered by descending `id`;
//! `row_modified_on` exists on the table only as the sync watermark and is
//! not part of the read projection.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    models::{JobCostRecord, JobCostRow},
    DbError,
};

/// Count all job-cost rows.
pub async fn count_all(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM job_costs")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Fetch one page of job-cost rows ordered by descending `id`.
pub async fn page_by_id_desc(
    pool: &PgPool,
    offset: i64,
    limit: i64,
) -> Result<Vec<JobCostRow>, DbError> {
    let rows = sqlx::query_as::<_, JobCostRow>(
        r#"
        SELECT id, parent_id, company_no, original_line_no, job_no, phase_no,
               cost_code_no, cost_class_no, amount, account_no,
               div_level_1, div_level_2, div_level_3, div_level_4,
               units, description, tax_flag, tax_base, tax_no, tax_rate,
               tax_amount, total, use_tax, eq_wo_no, equip_no, service_code_no
        FROM job_costs
        ORDER BY id DESC
        OFFSET $1 LIMIT $2
        "#,
    )
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Latest `row_modified_on` present locally. `None` when the table is empty.
pub async fn max_modified_on(pool: &PgPool) -> Result<Option<DateTime<Utc>>, DbError> {
    let max = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
        "SELECT MAX(row_modified_on) FROM job_costs",
    )
    .fetch_one(pool)
    .await?;

    Ok(max)
}

/// Insert a job-cost record, skipping rows whose `id` already exists.
/// Returns `true` when a row was actually written.
pub async fn insert_if_absent(pool: &PgPool, record: &JobCostRecord) -> Result<bool, DbError> {
    let result = job_cost_insert(
        r#"
        INSERT INTO job_costs
            (id, parent_id, company_no, original_line_no, job_no, phase_no,
             cost_code_no, cost_class_no, amount, account_no,
             div_level_1, div_level_2, div_level_3, div_level_4,
             units, description, tax_flag, tax_base, tax_no, tax_rate,
             tax_amount, total, use_tax, eq_wo_no, equip_no, service_code_no,
             row_modified_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27)
        ON CONFLICT (id) DO NOTHING
        "#,
        record,
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Insert or refresh a job-cost record by `id`.
pub async fn upsert(pool: &PgPool, record: &JobCostRecord) -> Result<(), DbError> {
    job_cost_insert(
        r#"
        INSERT INTO job_costs
            (id, parent_id, company_no, original_line_no, job_no, phase_no,
             cost_code_no, cost_class_no, amount, account_no,
             div_level_1, div_level_2, div_level_3, div_level_4,
             units, description, tax_flag, tax_base, tax_no, tax_rate,
             tax_amount, total, use_tax, eq_wo_no, equip_no, service_code_no,
             row_modified_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27)
        ON CONFLICT (id) DO UPDATE SET
            parent_id = EXCLUDED.parent_id,
            company_no = EXCLUDED.company_no,
            original_line_no = EXCLUDED.original_line_no,
            job_no = EXCLUDED.job_no,
            phase_no = EXCLUDED.phase_no,
            cost_code_no = EXCLUDED.cost_code_no,
            cost_class_no = EXCLUDED.cost_class_no,
            amount = EXCLUDED.amount,
            account_no = EXCLUDED.account_no,
            div_level_1 = EXCLUDED.div_level_1,
            div_level_2 = EXCLUDED.div_level_2,
            div_level_3 = EXCLUDED.div_level_3,
            div_level_4 = EXCLUDED.div_level_4,
            units = EXCLUDED.units,
            description = EXCLUDED.description,
            tax_flag = EXCLUDED.tax_flag,
            tax_base = EXCLUDED.tax_base,
            tax_no = EXCLUDED.tax_no,
            tax_rate = EXCLUDED.tax_rate,
            tax_amount = EXCLUDED.tax_amount,
            total = EXCLUDED.total,
            use_tax = EXCLUDED.use_tax,
            eq_wo_no = EXCLUDED.eq_wo_no,
            equip_no = EXCLUDED.equip_no,
            service_code_no = EXCLUDED.service_code_no,
            row_modified_on = EXCLUDED.row_modified_on
        "#,
        record,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Bind the full job-cost column list onto an insert statement. Both insert
/// paths share the same placeholder order.
fn job_cost_insert<'q>(
    sql: &'q str,
    record: &'q JobCostRecord,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    let row = &record.cost;
    sqlx::query(sql)
        .bind(row.id)
        .bind(row.parent_id)
        .bind(&row.company_no)
        .bind(row.original_line_no)
        .bind(&row.job_no)
        .bind(&row.phase_no)
        .bind(&row.cost_code_no)
        .bind(&row.cost_class_no)
        .bind(row.amount)
        .bind(&row.account_no)
        .bind(&row.div_level_1)
        .bind(&row.div_level_2)
        .bind(&row.div_level_3)
        .bind(&row.div_level_4)
        .bind(row.units)
        .bind(&row.description)
        .bind(row.tax_flag)
        .bind(row.tax_base)
        .bind(&row.tax_no)
        .bind(row.tax_rate)
        .bind(row.tax_amount)
        .bind(row.total)
        .bind(row.use_tax)
        .bind(&row.eq_wo_no)
        .bind(&row.equip_no)
        .bind(&row.service_code_no)
        .bind(record.row_modified_on)
}
