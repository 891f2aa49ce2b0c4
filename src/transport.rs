use async_trait::async_trait;
use reqwest::Client;

use crate::error::{CodesmithError, Result};
use crate::models::CompletionRequest;

/// Network seam for the completion endpoint. One implementation talks HTTP;
/// tests substitute canned bodies.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Performs exactly one request and returns the raw response body.
    /// Non-success status or network failure is a hard error; the pipeline
    /// does not retry.
    async fn send(&self, req: &CompletionRequest) -> Result<String>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(&self, req: &CompletionRequest) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, "Posting completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| CodesmithError::Transport(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CodesmithError::Transport(format!(
                "HTTP error! Status: {}",
                status.as_u16()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| CodesmithError::Transport(format!("failed to read response body: {e}")))
    }
}
