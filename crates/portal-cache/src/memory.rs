//! In-process cache-store backend.
//!
//! Entries are JSON values in a `DashMap`, each carrying its write
//! timestamp; staleness is checked on read against a single store-wide TTL,
//! so no background sweeper is needed. Suitable for single-process
//! deployments and for tests.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use portal_core::{AccountRecord, NormalizedListQuery, Pagination};

use crate::error::CacheError;
use crate::keys;
use crate::store::{CacheStore, ListMetadata};

/// Default entry time-to-live: five minutes.
const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct Entry {
    value: Value,
    written_at: Instant,
}

impl Entry {
    fn new(value: Value) -> Self {
        Self {
            value,
            written_at: Instant::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        self.written_at.elapsed() > ttl
    }
}

/// A thread-safe in-memory [`CacheStore`] with TTL-based staleness.
pub struct MemoryCacheStore {
    entries: DashMap<String, Entry>,
    ttl: Duration,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Number of live entries (stale entries still count until read).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn read(&self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_stale(self.ttl) {
                // Release the read guard before removing.
                drop(entry);
                self.entries.remove(key);
                return None;
            }
            return Some(entry.value.clone());
        }
        None
    }

    fn write(&self, key: String, value: Value) {
        self.entries.insert(key, Entry::new(value));
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get_list_metadata(
        &self,
        query: &NormalizedListQuery,
    ) -> Result<Option<ListMetadata>, CacheError> {
        match self.read(&keys::list_key(query)) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn set_list_metadata(
        &self,
        query: &NormalizedListQuery,
        account_ids: &[String],
        pagination: &Pagination,
    ) -> Result<(), CacheError> {
        let metadata = ListMetadata {
            account_ids: account_ids.to_vec(),
            pagination: *pagination,
        };
        self.write(keys::list_key(query), serde_json::to_value(&metadata)?);
        Ok(())
    }

    async fn get_accounts_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AccountRecord>>, CacheError> {
        ids.iter()
            .map(|id| {
                self.read(&keys::account_key(id))
                    .map(serde_json::from_value)
                    .transpose()
                    .map_err(CacheError::from)
            })
            .collect()
    }

    async fn set_accounts(&self, records: &[AccountRecord]) -> Result<(), CacheError> {
        for record in records {
            self.write(keys::account_key(&record.id), serde_json::to_value(record)?);
        }
        Ok(())
    }

    async fn get_account(&self, id: &str) -> Result<Option<AccountRecord>, CacheError> {
        match self.read(&keys::account_key(id)) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn set_account(&self, id: &str, record: &AccountRecord) -> Result<(), CacheError> {
        self.write(keys::account_key(id), serde_json::to_value(record)?);
        Ok(())
    }

    async fn get_by_key(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.read(key))
    }

    async fn set_by_key(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        self.write(key.to_string(), value.clone());
        Ok(())
    }

    async fn drop_by_key(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), CacheError> {
        let before = self.entries.len();
        self.entries.retain(|key, _| !keys::in_flush_namespace(key));
        tracing::debug!(
            dropped = before - self.entries.len(),
            remaining = self.entries.len(),
            "flushed list and count cache entries"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{AccountStatus, ListQuery};
    use serde_json::json;
    use time::macros::datetime;

    fn record(id: &str) -> AccountRecord {
        AccountRecord {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            first_name: "Jo".to_string(),
            last_name: "Bloggs".to_string(),
            organisation: None,
            status: AccountStatus::Pending,
            area_id: None,
            created_at: datetime!(2026-01-15 09:30 UTC),
            last_login_at: None,
        }
    }

    fn pagination() -> Pagination {
        Pagination {
            page: 1,
            total_pages: 3,
            total: 41,
            page_size: 20,
        }
    }

    #[tokio::test]
    async fn account_round_trip() {
        let store = MemoryCacheStore::new();
        store.set_account("a1", &record("a1")).await.unwrap();

        let found = store.get_account("a1").await.unwrap();
        assert_eq!(found, Some(record("a1")));
        assert!(store.get_account("a2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bulk_resolution_preserves_order_and_misses() {
        let store = MemoryCacheStore::new();
        store.set_accounts(&[record("a1"), record("a3")]).await.unwrap();

        let ids = vec!["a1".to_string(), "a2".to_string(), "a3".to_string()];
        let resolved = store.get_accounts_by_ids(&ids).await.unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].as_ref().map(|r| r.id.as_str()), Some("a1"));
        assert!(resolved[1].is_none());
        assert_eq!(resolved[2].as_ref().map(|r| r.id.as_str()), Some("a3"));
    }

    #[tokio::test]
    async fn list_snapshot_round_trip() {
        let store = MemoryCacheStore::new();
        let query = ListQuery::default().normalize(20);
        let ids = vec!["a1".to_string(), "a2".to_string()];

        store
            .set_list_metadata(&query, &ids, &pagination())
            .await
            .unwrap();

        let metadata = store.get_list_metadata(&query).await.unwrap().unwrap();
        assert_eq!(metadata.account_ids, ids);
        assert_eq!(metadata.pagination, pagination());
    }

    #[tokio::test]
    async fn coarse_flush_drops_lists_and_counts_but_keeps_records() {
        let store = MemoryCacheStore::new();
        let query = ListQuery::default().normalize(20);
        store.set_account("a1", &record("a1")).await.unwrap();
        store
            .set_list_metadata(&query, &["a1".to_string()], &pagination())
            .await
            .unwrap();
        store
            .set_by_key(&keys::count_key(AccountStatus::Pending), &json!(41))
            .await
            .unwrap();

        store.invalidate_all().await.unwrap();

        assert!(store.get_list_metadata(&query).await.unwrap().is_none());
        assert!(
            store
                .get_by_key(&keys::count_key(AccountStatus::Pending))
                .await
                .unwrap()
                .is_none()
        );
        assert!(store.get_account("a1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn drop_by_key_removes_one_record() {
        let store = MemoryCacheStore::new();
        store.set_accounts(&[record("a1"), record("a2")]).await.unwrap();

        store.drop_by_key(&store.account_key("a1")).await.unwrap();

        assert!(store.get_account("a1").await.unwrap().is_none());
        assert!(store.get_account("a2").await.unwrap().is_some());
        // Dropping an absent key is a no-op, not an error.
        store.drop_by_key(&store.account_key("a1")).await.unwrap();
    }

    #[tokio::test]
    async fn stale_entries_miss_on_read() {
        let store = MemoryCacheStore::with_ttl(Duration::ZERO);
        store.set_account("a1", &record("a1")).await.unwrap();
        std::thread::sleep(Duration::from_millis(10));

        assert!(store.get_account("a1").await.unwrap().is_none());
        // The stale entry was removed on read.
        assert!(store.is_empty());
    }
}
