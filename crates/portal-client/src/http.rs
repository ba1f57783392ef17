//! Reqwest implementation of the backend collaborator.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use portal_core::{AccountRecord, BackendSettings, Envelope, ListPayload};

use crate::backend::{AccountsBackend, ListRequestParams};
use crate::error::ClientError;

/// HTTP client for the accounts backend.
pub struct HttpAccountsBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAccountsBackend {
    /// Builds a client from backend settings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Build` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(settings: &BackendSettings) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        access_token: &str,
    ) -> Result<Envelope<T>, ClientError> {
        let resp = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await?;
        decode(resp).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<Envelope<T>, ClientError> {
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await?;
        decode(resp).await
    }
}

/// Decodes a response into an envelope.
///
/// Bodies that parse as an envelope pass through whatever the backend put in
/// them, success or failure. A non-success status with an unparseable body
/// becomes a failure envelope built from the status line; an unparseable
/// body on a success status is a transport error.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Envelope<T>, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;

    match serde_json::from_str::<Envelope<T>>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => {
            tracing::debug!(status = %status, "backend returned a non-envelope error body");
            Ok(Envelope::failure_message(format!("HTTP {status}")))
        }
        Err(e) => Err(ClientError::Parse(e.to_string())),
    }
}

#[async_trait]
impl AccountsBackend for HttpAccountsBackend {
    async fn list_accounts(
        &self,
        params: &ListRequestParams,
        access_token: &str,
    ) -> Result<Envelope<ListPayload>, ClientError> {
        self.get(&self.url("accounts"), &params.to_query_pairs(), access_token)
            .await
    }

    async fn get_account(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<AccountRecord>, ClientError> {
        self.get(&self.url(&format!("accounts/{id}")), &[], access_token)
            .await
    }

    async fn approve_account(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<Value>, ClientError> {
        self.post(&self.url(&format!("accounts/{id}/approve")), access_token)
            .await
    }

    async fn delete_account(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<Value>, ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("accounts/{id}")))
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await?;
        decode(resp).await
    }

    async fn reactivate_account(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<Value>, ClientError> {
        self.post(&self.url(&format!("accounts/{id}/reactivate")), access_token)
            .await
    }

    async fn resend_invitation(
        &self,
        id: &str,
        access_token: &str,
    ) -> Result<Envelope<Value>, ClientError> {
        self.post(
            &self.url(&format!("accounts/{id}/resend-invitation")),
            access_token,
        )
        .await
    }
}
