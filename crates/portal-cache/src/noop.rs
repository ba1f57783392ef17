//! A cache store that caches nothing.
//!
//! Every probe misses and every write succeeds, so deployments that run
//! without a cache use the same call sites as everyone else.

use async_trait::async_trait;
use serde_json::Value;

use portal_core::{AccountRecord, NormalizedListQuery, Pagination};

use crate::error::CacheError;
use crate::store::{CacheStore, ListMetadata};

/// A [`CacheStore`] for cache-disabled deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCacheStore;

#[async_trait]
impl CacheStore for NoopCacheStore {
    async fn get_list_metadata(
        &self,
        _query: &NormalizedListQuery,
    ) -> Result<Option<ListMetadata>, CacheError> {
        Ok(None)
    }

    async fn set_list_metadata(
        &self,
        _query: &NormalizedListQuery,
        _account_ids: &[String],
        _pagination: &Pagination,
    ) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get_accounts_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AccountRecord>>, CacheError> {
        Ok(vec![None; ids.len()])
    }

    async fn set_accounts(&self, _records: &[AccountRecord]) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get_account(&self, _id: &str) -> Result<Option<AccountRecord>, CacheError> {
        Ok(None)
    }

    async fn set_account(&self, _id: &str, _record: &AccountRecord) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get_by_key(&self, _key: &str) -> Result<Option<Value>, CacheError> {
        Ok(None)
    }

    async fn set_by_key(&self, _key: &str, _value: &Value) -> Result<(), CacheError> {
        Ok(())
    }

    async fn drop_by_key(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
