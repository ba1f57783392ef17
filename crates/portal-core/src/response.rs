//! Wire-shaped response types shared with the backend API.
//!
//! The backend wraps every payload in a `{success, data}` /
//! `{success, errors}` envelope. The service layer returns the same shape to
//! controllers, so backend failures can propagate verbatim.

use serde::{Deserialize, Serialize};

use crate::account::AccountRecord;

/// Pagination facts about one listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,

    pub total_pages: i64,

    /// Total matching items across all pages.
    pub total: i64,

    pub page_size: i64,
}

/// One page of account records plus its pagination facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPayload {
    pub data: Vec<AccountRecord>,
    pub pagination: Pagination,
}

/// One error entry in a failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,

    /// Field the error relates to, for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

/// The backend response envelope: `{success: true, data}` on success,
/// `{success: false, errors}` on failure.
///
/// Deserialization is shape-driven (untagged), so whatever error payload the
/// backend supplies survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Success { success: bool, data: T },
    Failure { success: bool, errors: Vec<ApiMessage> },
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self::Success {
            success: true,
            data,
        }
    }

    pub fn failure(errors: Vec<ApiMessage>) -> Self {
        Self::Failure {
            success: false,
            errors,
        }
    }

    /// A failure envelope carrying a single message.
    pub fn failure_message(message: impl Into<String>) -> Self {
        Self::failure(vec![ApiMessage::new(message)])
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&[ApiMessage]> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { errors, .. } => Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn success_envelope_deserializes() {
        let envelope: Envelope<Pagination> = serde_json::from_value(json!({
            "success": true,
            "data": {"page": 2, "totalPages": 5, "total": 93, "pageSize": 20}
        }))
        .unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.data().unwrap().total, 93);
    }

    #[test]
    fn failure_envelope_round_trips_verbatim() {
        let body = json!({
            "success": false,
            "errors": [{"message": "Account not found"}, {"message": "Invalid id", "field": "id"}]
        });
        let envelope: Envelope<Pagination> = serde_json::from_value(body.clone()).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.errors().unwrap().len(), 2);
        assert_json_eq!(serde_json::to_value(&envelope).unwrap(), body);
    }

    #[test]
    fn failure_message_builds_single_entry() {
        let envelope: Envelope<()> = Envelope::failure_message("boom");
        assert_eq!(envelope.errors().unwrap()[0].message, "boom");
    }
}
