//! The cache-store collaborator contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use portal_core::{AccountRecord, NormalizedListQuery, Pagination};

use crate::error::CacheError;
use crate::keys;

/// An immutable snapshot identifying which records answer a list query.
///
/// The snapshot holds member IDs and pagination facts only; the records
/// themselves are cached individually and re-resolved on every read. A
/// snapshot is never patched in place: an update is always "drop, then
/// miss-and-repopulate on the next read".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadata {
    /// Member IDs, in the order the backend returned them.
    pub account_ids: Vec<String>,

    pub pagination: Pagination,
}

/// The external key/value collaborator the portal caches through.
///
/// Implementations must be thread-safe (`Send + Sync`) and provide atomic
/// per-key get/set/drop; no locking or iteration is ever requested beyond
/// the coarse [`invalidate_all`](CacheStore::invalidate_all) flush. Entries
/// may expire on the store's own TTL, which is opaque to callers.
///
/// # Example
///
/// ```ignore
/// use portal_cache::{CacheStore, MemoryCacheStore};
///
/// async fn probe(store: &dyn CacheStore, id: &str) -> bool {
///     matches!(store.get_account(id).await, Ok(Some(_)))
/// }
/// ```
#[async_trait]
pub trait CacheStore: Send + Sync {
    // ==================== List snapshots ====================

    /// Fetches the list snapshot for a normalized query, if present.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// entries.
    async fn get_list_metadata(
        &self,
        query: &NormalizedListQuery,
    ) -> Result<Option<ListMetadata>, CacheError>;

    /// Persists the list snapshot for a normalized query.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    async fn set_list_metadata(
        &self,
        query: &NormalizedListQuery,
        account_ids: &[String],
        pagination: &Pagination,
    ) -> Result<(), CacheError>;

    // ==================== Account records ====================

    /// Resolves several records at once; the result order matches `ids`,
    /// with `None` in every position that missed.
    async fn get_accounts_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AccountRecord>>, CacheError>;

    /// Stores several records, each keyed by its own ID.
    async fn set_accounts(&self, records: &[AccountRecord]) -> Result<(), CacheError>;

    /// Fetches one record by ID.
    async fn get_account(&self, id: &str) -> Result<Option<AccountRecord>, CacheError>;

    /// Stores one record by ID.
    async fn set_account(&self, id: &str, record: &AccountRecord) -> Result<(), CacheError>;

    // ==================== Raw keys ====================

    /// Fetches a raw value by key (used for scalar counts).
    async fn get_by_key(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Stores a raw value by key.
    async fn set_by_key(&self, key: &str, value: &Value) -> Result<(), CacheError>;

    /// Drops a single key. Dropping an absent key is not an error.
    async fn drop_by_key(&self, key: &str) -> Result<(), CacheError>;

    // ==================== Invalidation ====================

    /// The key under which a record is stored, reproducible from the ID
    /// alone so the invalidator can drop it after a mutation.
    fn account_key(&self, id: &str) -> String {
        keys::account_key(id)
    }

    /// Coarse flush of every list snapshot and count entry.
    ///
    /// Account records are left in place; they are dropped individually.
    async fn invalidate_all(&self) -> Result<(), CacheError>;
}
