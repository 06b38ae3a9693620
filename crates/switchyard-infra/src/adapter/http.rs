//! Shared HTTP plumbing for the wire-format adapters.

use std::time::Duration;

use serde::de::DeserializeOwned;

use switchyard_types::error::{AdapterError, ConfigError};

/// Connection-level safety net. The router enforces the real per-class
/// attempt timeout; this only guards against sockets that never close.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(300);

/// Build the `reqwest` client shared by every adapter.
pub fn build_http_client() -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(CLIENT_TIMEOUT)
        .user_agent(concat!("switchyard/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Send a prepared POST and decode a 2xx JSON body.
///
/// Transport failures, non-2xx statuses, and undecodable bodies all map to
/// [`AdapterError`]; nothing here panics.
pub async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, AdapterError> {
    let response = request
        .send()
        .await
        .map_err(|e| AdapterError::Transport(format!("HTTP request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AdapterError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AdapterError::Transport(format!("failed to read response body: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AdapterError::MalformedResponse(format!("failed to parse response: {e}")))
}
