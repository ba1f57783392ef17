//! Account listing service for the admin portal.
//!
//! Two things live here:
//!
//! - [`AccountService`] — cache-aside orchestration for paginated account
//!   listings, by-ID reads, status counts and the mutating admin actions
//!   (approve, delete, reactivate, resend invitation) with their coarse
//!   cache invalidation.
//! - [`pagination`] — the pure view-model algorithm that turns pagination
//!   facts into GOV.UK-style page links with ellipsis collapsing.
//!
//! The service never fails for cache-related reasons: every cache-store
//! error is logged and degraded to a miss or no-op, and the backend call is
//! the fallback source of truth. Backend failures propagate verbatim in the
//! response envelope.

pub mod invalidation;
pub mod pagination;
pub mod service;

pub use invalidation::{MutationAction, invalidate_account};
pub use pagination::{NavLink, PageSummary, PaginationItem, PaginationViewModel};
pub use service::AccountService;
