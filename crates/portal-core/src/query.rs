//! List queries and their normalized form.
//!
//! A [`ListQuery`] is the raw filter/paging input from a controller. It is
//! normalized into a [`NormalizedListQuery`] before any caching decision is
//! made, so that two queries which differ only in surface form (untrimmed
//! search text, absent vs empty filters, missing page number) resolve to the
//! same cache entry.

use serde::Deserialize;

use crate::account::AccountStatus;

/// Raw list-query input for a paginated account listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Status tab the listing is filtered to.
    #[serde(default)]
    pub status: AccountStatus,

    /// Free-text search over name/email.
    pub search: Option<String>,

    /// Area filter.
    pub area_id: Option<String>,

    /// 1-based page number.
    pub page: Option<i64>,

    /// Items per page; defaults from configuration when absent.
    pub page_size: Option<i64>,
}

impl ListQuery {
    /// Normalize this query for use as a cache-key basis.
    ///
    /// Search text is trimmed, absent filters become empty strings, the page
    /// is clamped to at least 1 and the page size falls back to
    /// `default_page_size`. Two queries that normalize identically must hit
    /// the same cache entry.
    pub fn normalize(&self, default_page_size: i64) -> NormalizedListQuery {
        NormalizedListQuery {
            status: self.status,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            area_id: self
                .area_id
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            page: self.page.filter(|p| *p >= 1).unwrap_or(1),
            page_size: self
                .page_size
                .filter(|s| *s >= 1)
                .unwrap_or(default_page_size),
        }
    }
}

/// A normalized list query: the canonical identity of one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedListQuery {
    pub status: AccountStatus,

    /// Trimmed search text; empty when no search filter applies.
    pub search: String,

    /// Area filter; empty when no area filter applies.
    pub area_id: String,

    pub page: i64,

    pub page_size: i64,
}
