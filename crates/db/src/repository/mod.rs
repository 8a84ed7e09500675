//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! No business logic, no domain types — pure SQL.
//!
//! Queries use the runtime-checked sqlx API rather than the compile-time
//! macros so the workspace builds without a `DATABASE_URL` at hand.

pub mod invoices;
pub mod job_history;
pub mod job_costs;
