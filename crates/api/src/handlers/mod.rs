//! Request handlers, one module per endpoint group.

pub mod invoices;
pub mod job_costs;
pub mod job_history;
pub mod pipelines;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::error::ApiError;

/// Standard paginated list envelope. `data` is always present — `[]` when
/// nothing matched — and `total` reflects the filtered count either way.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

/// Parse a date-range bound. Accepts RFC 3339 timestamps or bare
/// `YYYY-MM-DD` dates, the latter read as midnight UTC — day-granularity
/// bounds compare the way the upstream stores them.
pub(crate) fn parse_date_param(
    name: &str,
    value: Option<&str>,
) -> Result<DateTime<Utc>, ApiError> {
    let raw = value.ok_or_else(|| ApiError::bad_request(format!("{name} is required")))?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ApiError::bad_request(format!(
        "{name} must be an RFC 3339 timestamp or a YYYY-MM-DD date, got '{raw}'"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bare_dates_parse_as_midnight_utc() {
        let parsed = parse_date_param("fromDate", Some("2024-01-31")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn rfc3339_timestamps_are_normalised_to_utc() {
        let parsed = parse_date_param("toDate", Some("2024-01-31T10:00:00+02:00")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap());
    }

    #[test]
    fn missing_value_is_a_client_error() {
        assert!(parse_date_param("fromDate", None).is_err());
    }

    #[test]
    fn malformed_value_is_a_client_error() {
        assert!(parse_date_param("fromDate", Some("last tuesday")).is_err());
        assert!(parse_date_param("fromDate", Some("31/01/2024")).is_err());
    }

    #[test]
    fn empty_result_serialises_with_empty_data_array() {
        let response: ListResponse<i32> = ListResponse {
            data: Vec::new(),
            total: 0,
            page: 1,
            limit: 10,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"data": [], "total": 0, "page": 1, "limit": 10})
        );
    }
}
