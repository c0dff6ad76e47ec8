//! Shared HTTP plumbing for the Kapacitor and InfluxDB clients.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::domain::errors::{DomainError, DomainResult};

/// Build the HTTP client shared by both services.
///
/// Without a timeout, requests wait as long as the transport allows.
pub fn build_client(timeout: Option<Duration>) -> DomainResult<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .user_agent(concat!("kapacitor-unit/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| DomainError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Turn a non-2xx response into a transport error carrying status and body.
pub(crate) async fn ensure_success(resp: Response, operation: &str) -> DomainResult<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(DomainError::Transport(format!("{operation} returned {status}:: {body}")))
}

/// Strip the trailing slash so paths can be appended verbatim.
pub(crate) fn normalize_host(host: impl Into<String>) -> String {
    let host = host.into();
    host.trim_end_matches('/').to_string()
}
