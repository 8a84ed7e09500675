//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour. Each
//! struct lists exactly the columns its read endpoint projects, so a row
//! fetched by the repository serializes straight into a response body.
//!
//! All monetary and quantity columns are `DOUBLE PRECISION` upstream and map
//! to `f64` here; upstream row GUIDs map to `Uuid`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// invoices
// ---------------------------------------------------------------------------

/// An accounts-receivable invoice row pulled from the upstream ledger.
///
/// `row_modified_on` is assigned monotonically by the upstream writer and is
/// the sole time-range filter key for this table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InvoiceRow {
    pub invoice_no: String,
    pub posted_flag: Option<String>,
    pub customer_no: Option<String>,
    pub description: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub transaction_date: Option<NaiveDate>,
    pub post_date: Option<NaiveDate>,
    pub estimate_no: Option<String>,
    pub job_no: Option<String>,
    pub invoice_amount: Option<f64>,
    pub customer_id: Option<i64>,
    pub estimate_id: Option<i64>,
    pub invoice_id: i64,
    pub job_id: Option<i64>,
    pub release_retainage_amount: Option<f64>,
    pub original_release_retainage_amount: Option<f64>,
    pub adjust_release_retainage_amount: Option<f64>,
    pub adjust_amount_due: Option<f64>,
    pub original_invoice_amount: Option<f64>,
    pub row_unique_id: Uuid,
    pub row_modified_on: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// job_history
// ---------------------------------------------------------------------------

/// A job-history (cost transaction) row, keyed upstream by
/// `job_no` + `transaction_no` and locally by `row_unique_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobHistoryRow {
    pub job_no: String,
    pub earn_type_no: Option<String>,
    pub cost_class_no: Option<String>,
    pub date_booked: Option<NaiveDate>,
    pub transaction_no: i64,
    pub date_posted: Option<NaiveDate>,
    pub cost: Option<f64>,
    pub units: Option<f64>,
    pub quantity: Option<f64>,
    pub vendor_no: Option<String>,
    pub job_id: Option<i64>,
    pub vendor_id: Option<i64>,
    pub datetime_posted: Option<DateTime<Utc>>,
    pub row_unique_id: Uuid,
    pub row_modified_on: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// job_costs
// ---------------------------------------------------------------------------

/// A job-cost line row. `parent_id` is a self-reference the upstream system
/// uses for line hierarchies; it is not enforced as a foreign key here.
///
/// The read projection for this table deliberately excludes
/// `row_modified_on` — listings are ordered by `id` instead. The column
/// still exists on the table and rides along in [`JobCostRecord`] for sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobCostRow {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub company_no: Option<String>,
    pub original_line_no: Option<i32>,
    pub job_no: Option<String>,
    pub phase_no: Option<String>,
    pub cost_code_no: Option<String>,
    pub cost_class_no: Option<String>,
    pub amount: Option<f64>,
    pub account_no: Option<String>,
    pub div_level_1: Option<String>,
    pub div_level_2: Option<String>,
    pub div_level_3: Option<String>,
    pub div_level_4: Option<String>,
    pub units: Option<f64>,
    pub description: Option<String>,
    pub tax_flag: Option<bool>,
    pub tax_base: Option<f64>,
    pub tax_no: Option<String>,
    pub tax_rate: Option<f64>,
    pub tax_amount: Option<f64>,
    pub total: Option<f64>,
    pub use_tax: Option<bool>,
    pub eq_wo_no: Option<String>,
    pub equip_no: Option<String>,
    pub service_code_no: Option<String>,
}

/// A job-cost row as it arrives from the upstream source: the projected
/// columns plus the modification timestamp used as the sync watermark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCostRecord {
    #[serde(flatten)]
    pub cost: JobCostRow,
    pub row_modified_on: DateTime<Utc>,
}
