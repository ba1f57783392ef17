//! Cache-aside orchestration for account listings.

use std::sync::Arc;

use serde_json::Value;

use portal_cache::{CacheStore, keys};
use portal_client::{AccountsBackend, ClientError, ListRequestParams};
use portal_core::{
    AccountRecord, AccountStatus, Envelope, ListPayload, ListQuery, NormalizedListQuery,
    PortalConfig,
};

use crate::invalidation::{MutationAction, invalidate_account};

/// The account service the portal's controllers call.
///
/// Reads go cache-first with the backend as fallback source of truth;
/// mutations go backend-first with unconditional cache invalidation on
/// success. Without a cache store the service degrades to a pure
/// pass-through to the backend.
pub struct AccountService {
    backend: Arc<dyn AccountsBackend>,
    cache: Option<Arc<dyn CacheStore>>,
    default_page_size: i64,
}

impl AccountService {
    pub fn new(
        backend: Arc<dyn AccountsBackend>,
        cache: Option<Arc<dyn CacheStore>>,
        default_page_size: i64,
    ) -> Self {
        Self {
            backend,
            cache,
            default_page_size,
        }
    }

    /// Builds a service from loaded configuration. A cache store passed
    /// while caching is disabled in configuration is ignored.
    pub fn from_config(
        backend: Arc<dyn AccountsBackend>,
        cache: Option<Arc<dyn CacheStore>>,
        config: &PortalConfig,
    ) -> Self {
        Self::new(
            backend,
            if config.cache.enabled { cache } else { None },
            config.cache.default_page_size,
        )
    }

    // ==================== Listings ====================

    /// Fetches one page of accounts, cache-aside.
    ///
    /// A cached list is served only when its snapshot is present **and**
    /// every member ID still resolves to a cached record; a partial
    /// resolution is a full miss and the backend is called. Successful
    /// non-empty backend responses populate both the per-record entries and
    /// the list snapshot; empty result sets are never cached. The backend
    /// envelope is returned unchanged, success or failure.
    pub async fn get_accounts(
        &self,
        query: &ListQuery,
        access_token: &str,
    ) -> Envelope<ListPayload> {
        let normalized = query.normalize(self.default_page_size);

        if let Some(cache) = &self.cache {
            if let Some(payload) = self.cached_list(cache.as_ref(), &normalized).await {
                tracing::debug!(
                    status = %normalized.status,
                    page = normalized.page,
                    "account list served from cache"
                );
                return Envelope::success(payload);
            }
        }

        let params = ListRequestParams::from_query(&normalized);
        let envelope = match self.backend.list_accounts(&params, access_token).await {
            Ok(envelope) => envelope,
            Err(error) => return transport_failure(error),
        };

        if let Some(cache) = &self.cache {
            if let Envelope::Success { data, .. } = &envelope {
                if !data.data.is_empty() {
                    self.populate_list(cache.as_ref(), &normalized, data).await;
                }
            }
        }

        envelope
    }

    /// Attempts an all-or-nothing cache hit for a normalized query.
    ///
    /// Cache-store errors are logged and treated as misses.
    async fn cached_list(
        &self,
        cache: &dyn CacheStore,
        query: &NormalizedListQuery,
    ) -> Option<ListPayload> {
        let metadata = match cache.get_list_metadata(query).await {
            Ok(Some(metadata)) => metadata,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(error = %error, "list snapshot probe failed; treating as miss");
                return None;
            }
        };

        let resolved = match cache.get_accounts_by_ids(&metadata.account_ids).await {
            Ok(resolved) => resolved,
            Err(error) => {
                tracing::warn!(error = %error, "record resolution failed; treating as miss");
                return None;
            }
        };

        let mut records = Vec::with_capacity(resolved.len());
        for record in resolved {
            match record {
                Some(record) => records.push(record),
                None => {
                    tracing::debug!(
                        status = %query.status,
                        page = query.page,
                        "partial list hit; falling back to backend"
                    );
                    return None;
                }
            }
        }

        Some(ListPayload {
            data: records,
            pagination: metadata.pagination,
        })
    }

    /// Populates per-record entries and the list snapshot after a
    /// successful backend response. Write errors are logged and swallowed.
    async fn populate_list(
        &self,
        cache: &dyn CacheStore,
        query: &NormalizedListQuery,
        payload: &ListPayload,
    ) {
        if let Err(error) = cache.set_accounts(&payload.data).await {
            tracing::warn!(error = %error, "failed to cache account records");
            return;
        }

        let ids: Vec<String> = payload.data.iter().map(|record| record.id.clone()).collect();
        if let Err(error) = cache
            .set_list_metadata(query, &ids, &payload.pagination)
            .await
        {
            tracing::warn!(error = %error, "failed to cache list snapshot");
        }
    }

    // ==================== Single records ====================

    /// Fetches one account by ID, read-through.
    pub async fn get_account_by_id(
        &self,
        id: &str,
        access_token: &str,
    ) -> Envelope<AccountRecord> {
        if let Some(cache) = &self.cache {
            match cache.get_account(id).await {
                Ok(Some(record)) => {
                    tracing::debug!(account_id = id, "account served from cache");
                    return Envelope::success(record);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(
                        account_id = id,
                        error = %error,
                        "account probe failed; treating as miss"
                    );
                }
            }
        }

        let envelope = match self.backend.get_account(id, access_token).await {
            Ok(envelope) => envelope,
            Err(error) => return transport_failure(error),
        };

        if let Some(cache) = &self.cache {
            if let Envelope::Success { data, .. } = &envelope {
                if let Err(error) = cache.set_account(id, data).await {
                    tracing::warn!(account_id = id, error = %error, "failed to cache account");
                }
            }
        }

        envelope
    }

    // ==================== Counts ====================

    /// Number of accounts awaiting approval.
    pub async fn get_pending_count(&self, access_token: &str) -> i64 {
        self.get_count(AccountStatus::Pending, access_token).await
    }

    /// Number of active accounts.
    pub async fn get_active_count(&self, access_token: &str) -> i64 {
        self.get_count(AccountStatus::Active, access_token).await
    }

    /// Counts come from a `pageSize = 1` backend list call, read purely for
    /// its `pagination.total` and cached as a scalar. The probe deliberately
    /// bypasses the list cache so the degenerate one-item page is never
    /// stored as a listing. A failed probe counts as zero.
    async fn get_count(&self, status: AccountStatus, access_token: &str) -> i64 {
        let key = keys::count_key(status);

        if let Some(cache) = &self.cache {
            match cache.get_by_key(&key).await {
                Ok(Some(value)) => {
                    if let Some(count) = value.as_i64() {
                        return count;
                    }
                    tracing::warn!(key = %key, "non-numeric cached count; refetching");
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(key = %key, error = %error, "count probe failed; treating as miss");
                }
            }
        }

        let params = ListRequestParams::count_probe(status);
        let total = match self.backend.list_accounts(&params, access_token).await {
            Ok(envelope) => envelope
                .data()
                .map(|payload| payload.pagination.total)
                .unwrap_or(0),
            Err(error) => {
                tracing::warn!(status = %status, error = %error, "count fetch failed");
                0
            }
        };

        if let Some(cache) = &self.cache {
            if let Err(error) = cache.set_by_key(&key, &Value::from(total)).await {
                tracing::warn!(key = %key, error = %error, "failed to cache count");
            }
        }

        total
    }

    // ==================== Mutations ====================

    /// Approves a pending account.
    pub async fn approve_account(&self, id: &str, access_token: &str) -> Envelope<Value> {
        self.mutate(MutationAction::Approval, id, access_token).await
    }

    /// Deletes an account.
    pub async fn delete_account(&self, id: &str, access_token: &str) -> Envelope<Value> {
        self.mutate(MutationAction::Deletion, id, access_token).await
    }

    /// Reactivates a deactivated account.
    pub async fn reactivate_account(&self, id: &str, access_token: &str) -> Envelope<Value> {
        self.mutate(MutationAction::Reactivation, id, access_token)
            .await
    }

    /// Resends the invitation email for a pending account.
    pub async fn resend_invitation(&self, id: &str, access_token: &str) -> Envelope<Value> {
        self.mutate(MutationAction::ResendInvitation, id, access_token)
            .await
    }

    /// Backend call first, then unconditional invalidation on success.
    async fn mutate(
        &self,
        action: MutationAction,
        id: &str,
        access_token: &str,
    ) -> Envelope<Value> {
        let result = match action {
            MutationAction::Approval => self.backend.approve_account(id, access_token).await,
            MutationAction::Deletion => self.backend.delete_account(id, access_token).await,
            MutationAction::Reactivation => self.backend.reactivate_account(id, access_token).await,
            MutationAction::ResendInvitation => {
                self.backend.resend_invitation(id, access_token).await
            }
        };

        let envelope = match result {
            Ok(envelope) => envelope,
            Err(error) => return transport_failure(error),
        };

        if envelope.is_success() {
            if let Some(cache) = &self.cache {
                invalidate_account(cache.as_ref(), id, action).await;
            }
        }

        envelope
    }
}

/// Folds a transport-level client error into the failure envelope shape
/// controllers expect. Backend-authored failure bodies never pass through
/// here; they arrive as envelopes already.
fn transport_failure<T>(error: ClientError) -> Envelope<T> {
    tracing::warn!(error = %error, "backend call failed before a response was obtained");
    Envelope::failure_message(error.to_string())
}
