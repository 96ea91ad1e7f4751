//! Pagination parameters for list queries.

use serde::Deserialize;

/// Page used when the query omits `page` or it is not a positive integer
pub const DEFAULT_PAGE: u32 = 1;

/// Limit used when the query omits `limit` or it is not a positive integer
pub const DEFAULT_LIMIT: u32 = 3;

/// Raw `?page=&limit=` query; values are kept as strings so that garbage
/// falls back to the defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// A resolved, 1-based page window.
///
/// `limit` has no upper bound here; callers exposing this to untrusted
/// input own that guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Creates a Pagination, replacing zero values with the defaults.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> usize {
        (self.page as usize)
            .saturating_sub(1)
            .saturating_mul(self.limit as usize)
    }

    /// Cache key for a list page of `kind`, e.g. `bookList-2-3`.
    pub fn cache_key(&self, kind: &str) -> String {
        format!("{}List-{}-{}", kind, self.page, self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<&PageQuery> for Pagination {
    fn from(query: &PageQuery) -> Self {
        Self::new(
            parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            parse_positive(query.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
        )
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|v| *v >= 1)
}
