//! SyncTransport - pushes outbox batches to the remote store

use async_trait::async_trait;
use reqwest::Client;
use shared::error::{AppError, ErrorCode};
use shared::sync::{SyncBatch, SyncResponse};
use std::time::Duration;

/// Destination for outbox batches.
///
/// Implementations only carry bytes; retry and coalescing live in
/// [`super::SyncWorker`].
#[async_trait]
pub trait SyncTransport: Send + Sync {
    async fn push_batch(&self, batch: &SyncBatch) -> Result<SyncResponse, AppError>;
}

/// HTTP client for the remote sync API
pub struct HttpSyncTransport {
    client: Client,
    base_url: String,
}

impl HttpSyncTransport {
    /// `base_url` is the remote root, e.g. "https://sync.example.com".
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/sync", self.base_url)
    }
}

#[async_trait]
impl SyncTransport for HttpSyncTransport {
    async fn push_batch(&self, batch: &SyncBatch) -> Result<SyncResponse, AppError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(batch)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::with_message(ErrorCode::TimeoutError, format!("Sync request timed out: {e}"))
                } else {
                    AppError::network(format!("Sync request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::network(format!(
                "Sync failed with status {status}: {body}"
            )));
        }

        response
            .json::<SyncResponse>()
            .await
            .map_err(|e| AppError::internal(format!("Failed to parse sync response: {e}")))
    }
}
