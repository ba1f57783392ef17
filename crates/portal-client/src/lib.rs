//! Backend REST API collaborator.
//!
//! The portal's source of truth is an accounts REST API. This crate defines
//! the trait seam the service layer calls through ([`AccountsBackend`]) and
//! the reqwest implementation of it ([`HttpAccountsBackend`]). Backend
//! failure bodies pass through as failure envelopes; only transport-level
//! problems surface as [`ClientError`].

pub mod backend;
pub mod error;
pub mod http;

pub use backend::{AccountsBackend, ListRequestParams};
pub use error::ClientError;
pub use http::HttpAccountsBackend;
