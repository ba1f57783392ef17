//! Cache invalidation after mutating admin actions.
//!
//! Any successful mutation drops the mutated record's cache entry and then
//! coarsely flushes every list snapshot and count entry, whatever filters
//! they were cached under. Mutations are rare relative to reads, so the
//! cheap guarantee of never serving stale post-mutation state wins over
//! cache-hit efficiency here; no selective invalidation by filter is
//! attempted.
//!
//! Invalidation never fails the enclosing request: a cache store that
//! errors leaves the cache incoherent until its TTL catches up, which is
//! tolerable, while surfacing an error to an administrator whose action
//! just succeeded is not.

use std::fmt;

use portal_cache::CacheStore;

/// The mutating admin actions that trigger invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Approval,
    Deletion,
    Reactivation,
    ResendInvitation,
}

impl MutationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
            Self::Deletion => "deletion",
            Self::Reactivation => "reactivation",
            Self::ResendInvitation => "resend-invitation",
        }
    }
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drops the record's own cache entry, then flushes all list and count
/// entries.
///
/// Both steps are attempted even if the first fails; failures are logged as
/// warnings and never propagate.
pub async fn invalidate_account(cache: &dyn CacheStore, id: &str, action: MutationAction) {
    let key = cache.account_key(id);
    if let Err(error) = cache.drop_by_key(&key).await {
        tracing::warn!(
            account_id = id,
            action = %action,
            error = %error,
            "failed to drop account cache entry"
        );
    }

    match cache.invalidate_all().await {
        Ok(()) => tracing::debug!(
            account_id = id,
            action = %action,
            "list and count caches flushed"
        ),
        Err(error) => tracing::warn!(
            account_id = id,
            action = %action,
            error = %error,
            "failed to flush list and count caches"
        ),
    }
}
