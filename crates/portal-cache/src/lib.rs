//! Cache-store abstraction for the admin portal list cache.
//!
//! The portal treats its cache as an external key/value collaborator with
//! plain get/set/drop semantics. This crate defines that collaborator
//! contract ([`CacheStore`]), the versioned key builder every implementation
//! shares, and two backends:
//!
//! - [`MemoryCacheStore`] — an in-process DashMap store with TTL staleness
//! - [`NoopCacheStore`] — every probe misses, for cache-disabled deployments
//!
//! Three kinds of entry live in one store, distinguished by key namespace:
//! individual account records, list snapshots (member IDs plus pagination
//! facts, never the records themselves) and scalar status counts. The
//! coarse flush ([`CacheStore::invalidate_all`]) drops list and count
//! entries while leaving records in place; record entries are dropped
//! individually by ID.

pub mod error;
pub mod keys;
pub mod memory;
pub mod noop;
pub mod store;

pub use error::CacheError;
pub use memory::MemoryCacheStore;
pub use noop::NoopCacheStore;
pub use store::{CacheStore, ListMetadata};
