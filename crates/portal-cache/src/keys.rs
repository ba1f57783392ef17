//! Versioned cache-key builder.
//!
//! Every key the portal writes is produced here, so the invalidator can
//! reproduce a record's key from its ID alone and the coarse flush can
//! recognise the list/count namespaces by prefix. Keys carry an explicit
//! version segment: changing the shape of any key means bumping
//! [`KEY_VERSION`], which strands old entries instead of colliding with
//! them.

use portal_core::{AccountStatus, NormalizedListQuery};

/// Version segment prefixed to every key.
pub const KEY_VERSION: &str = "v1";

/// Key for one account record.
pub fn account_key(id: &str) -> String {
    format!("{KEY_VERSION}:account:{id}")
}

/// Key for the list snapshot of one normalized query.
///
/// Field order is fixed and free-text segments are percent-encoded, so two
/// queries produce the same key exactly when they normalized identically.
pub fn list_key(query: &NormalizedListQuery) -> String {
    format!(
        "{KEY_VERSION}:list:status={}&search={}&area={}&page={}&size={}",
        query.status,
        encode(&query.search),
        encode(&query.area_id),
        query.page,
        query.page_size,
    )
}

/// Key for the scalar count of one status.
pub fn count_key(status: AccountStatus) -> String {
    format!("{KEY_VERSION}:count:{status}")
}

/// Whether a key belongs to a namespace removed by the coarse flush.
///
/// List snapshots and counts are flushed together; account records are not,
/// they are dropped individually by ID.
pub fn in_flush_namespace(key: &str) -> bool {
    key.starts_with(&format!("{KEY_VERSION}:list:"))
        || key.starts_with(&format!("{KEY_VERSION}:count:"))
}

fn encode(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}
