//! The backend trait seam and its request-parameter translation.

use async_trait::async_trait;
use serde_json::Value;

use portal_core::{AccountRecord, AccountStatus, Envelope, ListPayload, NormalizedListQuery};

use crate::error::ClientError;

/// Wire-level parameters for the backend list endpoint.
///
/// Status, page and page size are always sent; search and area only when
/// they carry a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequestParams {
    pub status: AccountStatus,
    pub page: i64,
    pub page_size: i64,
    pub search: Option<String>,
    pub area_id: Option<String>,
}

impl ListRequestParams {
    /// Translate a normalized query into request parameters.
    pub fn from_query(query: &NormalizedListQuery) -> Self {
        Self {
            status: query.status,
            page: query.page,
            page_size: query.page_size,
            search: non_empty(&query.search),
            area_id: non_empty(&query.area_id),
        }
    }

    /// The smallest possible list call that still reports a total: one item,
    /// first page, no filters. Used to derive status counts.
    pub fn count_probe(status: AccountStatus) -> Self {
        Self {
            status,
            page: 1,
            page_size: 1,
            search: None,
            area_id: None,
        }
    }

    /// Query pairs in the order the backend documents them.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("status", self.status.to_string()),
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(area_id) = &self.area_id {
            pairs.push(("areaId", area_id.clone()));
        }
        pairs
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The accounts backend the service layer calls through.
///
/// Every method carries the caller's access token. A returned `Ok` envelope
/// may still be a failure: the backend's own error payloads are propagated
/// verbatim, never rewritten. `Err` is reserved for transport problems.
#[async_trait]
pub trait AccountsBackend: Send + Sync {
    /// Fetches one page of accounts.
    async fn list_accounts(
        &self,
        params: &ListRequestParams,
        access_token: &str,
    ) -> Result<Envelope<ListPayload>, ClientError>;

    /// Fetches one account by ID.
    async fn get_account(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<AccountRecord>, ClientError>;

    /// Approves a pending account.
    async fn approve_account(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<Value>, ClientError>;

    /// Deletes an account.
    async fn delete_account(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<Value>, ClientError>;

    /// Reactivates a deactivated account.
    async fn reactivate_account(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<Value>, ClientError>;

    /// Resends the invitation email for a pending account.
    async fn resend_invitation(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<Value>, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::ListQuery;

    #[test]
    fn blank_filters_are_omitted_from_query_pairs() {
        let query = ListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        }
        .normalize(20);
        let pairs = ListRequestParams::from_query(&query).to_query_pairs();

        assert_eq!(
            pairs,
            vec![
                ("status", "pending".to_string()),
                ("page", "1".to_string()),
                ("pageSize", "20".to_string()),
            ]
        );
    }

    #[test]
    fn present_filters_are_sent_trimmed() {
        let query = ListQuery {
            status: AccountStatus::Active,
            search: Some(" john ".to_string()),
            area_id: Some("5".to_string()),
            page: Some(2),
            page_size: Some(10),
        }
        .normalize(20);
        let pairs = ListRequestParams::from_query(&query).to_query_pairs();

        assert!(pairs.contains(&("search", "john".to_string())));
        assert!(pairs.contains(&("areaId", "5".to_string())));
        assert!(pairs.contains(&("page", "2".to_string())));
        assert!(pairs.contains(&("pageSize", "10".to_string())));
    }

    #[test]
    fn count_probe_requests_a_single_item() {
        let params = ListRequestParams::count_probe(AccountStatus::Pending);
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 1);
        assert!(params.search.is_none());
        assert!(params.area_id.is_none());
    }
}
