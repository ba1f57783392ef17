use thiserror::Error;

/// Transport-level errors from the backend collaborator.
///
/// Failures the backend itself reports arrive as failure envelopes, not as
/// errors; these variants cover the cases where no envelope was obtained at
/// all.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Failed to parse response body: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
