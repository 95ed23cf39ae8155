//! Pagination extractor
//!
//! Extracts offset-based pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use campus_core::traits::Page;
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 20;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// Number of rows to skip
    #[serde(default)]
    pub skip: Option<i64>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub skip: i64,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Convert into a repository page with the given default limit
    pub fn page_with_default(&self, default_limit: i64) -> Page {
        Page::new(self.skip, self.limit.unwrap_or(default_limit))
    }

    /// Convert into a repository page with the standard default limit
    pub fn page(&self) -> Page {
        self.page_with_default(DEFAULT_LIMIT)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        let skip = params.skip.unwrap_or(0);
        if skip < 0 {
            return Err(ApiError::invalid_query("skip must be non-negative"));
        }

        if let Some(limit) = params.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(ApiError::invalid_query(format!(
                    "limit must be between 1 and {MAX_LIMIT}"
                )));
            }
        }

        Ok(Pagination {
            skip,
            limit: params.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let pagination = Pagination {
            skip: 0,
            limit: None,
        };
        let page = pagination.page();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, DEFAULT_LIMIT);

        let page = pagination.page_with_default(50);
        assert_eq!(page.limit, 50);
    }

    #[test]
    fn test_explicit_limit_wins() {
        let pagination = Pagination {
            skip: 40,
            limit: Some(10),
        };
        let page = pagination.page_with_default(50);
        assert_eq!(page.offset, 40);
        assert_eq!(page.limit, 10);
    }
}
