//! Derivation of the `{skip, limit, page}` triple from raw query
//! parameters. This is the single authority on pagination bounds for all
//! read handlers.

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound on page size; larger requests are a client error.
pub const MAX_LIMIT: u32 = 100;

/// Raw pagination parameters as they arrive on the wire.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageParamError {
    #[error("page must be at least 1")]
    PageOutOfRange,

    #[error("limit must be between 1 and {MAX_LIMIT}")]
    LimitOutOfRange,
}

/// The validated pagination triple. `skip` is pre-computed as
/// `(page - 1) * limit` and sized for SQL offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: u32,
    pub page: u32,
}

impl Pagination {
    pub fn resolve(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageParamError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page == 0 {
            return Err(PageParamError::PageOutOfRange);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageParamError::LimitOutOfRange);
        }

        Ok(Self {
            skip: i64::from(page - 1) * i64::from(limit),
            limit,
            page,
        })
    }

    pub fn from_query(query: &PageQuery) -> Result<Self, PageParamError> {
        Self::resolve(query.page, query.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_are_absent() {
        let p = Pagination::resolve(None, None).unwrap();
        assert_eq!(p.page, DEFAULT_PAGE);
        assert_eq!(p.limit, DEFAULT_LIMIT);
        assert_eq!(p.skip, 0);
    }

    #[test]
    fn skip_is_page_minus_one_times_limit() {
        for page in 1..=20u32 {
            for limit in [1u32, 2, 10, 25, 100] {
                let p = Pagination::resolve(Some(page), Some(limit)).unwrap();
                assert_eq!(p.skip, i64::from(page - 1) * i64::from(limit));
            }
        }
    }

    #[test]
    fn zero_page_is_rejected() {
        assert_eq!(
            Pagination::resolve(Some(0), Some(10)),
            Err(PageParamError::PageOutOfRange)
        );
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert_eq!(
            Pagination::resolve(Some(1), Some(0)),
            Err(PageParamError::LimitOutOfRange)
        );
    }

    #[test]
    fn oversized_limit_is_rejected() {
        assert_eq!(
            Pagination::resolve(Some(1), Some(MAX_LIMIT + 1)),
            Err(PageParamError::LimitOutOfRange)
        );
    }

    #[test]
    fn max_limit_is_accepted() {
        let p = Pagination::resolve(Some(3), Some(MAX_LIMIT)).unwrap();
        assert_eq!(p.skip, 200);
    }
}
