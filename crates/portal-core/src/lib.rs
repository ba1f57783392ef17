//! Core domain types for the admin portal service layer.
//!
//! This crate holds everything the other portal crates agree on:
//!
//! - Account records and their lifecycle statuses
//! - List queries and their normalized form (the cache-key basis)
//! - The success/failure response envelope shared with the backend API
//! - Startup configuration

pub mod account;
pub mod config;
pub mod error;
pub mod query;
pub mod response;

pub use account::{AccountRecord, AccountStatus};
pub use crate::config::{BackendSettings, CacheSettings, PortalConfig};
pub use error::CoreError;
pub use query::{ListQuery, NormalizedListQuery};
pub use response::{ApiMessage, Envelope, ListPayload, Pagination};
