//! Form relay HTTP infrastructure adapter.
//!
//! Implements the [`relay::HttpClient`] trait over `reqwest`. The relay crate
//! sees only [`relay::HttpClient`]; TLS, timeouts, and body decoding live here.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** No relay rules: every response that arrives is handed
//! back as a [`relay::HttpResponse`] whatever its status, and classification
//! is left to the caller.

use std::time::Duration;

use async_trait::async_trait;
use relay::{HttpClient, HttpResponse, TransportError};
use thiserror::Error;
use tracing::debug;

/// Request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The underlying `reqwest` client could not be constructed.
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct BuildError(#[from] reqwest::Error);

/// [`HttpClient`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Builds a client with [`REQUEST_TIMEOUT`] and rustls TLS.
    pub fn new() -> Result<Self, BuildError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("form-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn execute(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<HttpResponse, TransportError> {
        let response = request.send().await.map_err(|e| TransportError::Request {
            url: redact(url),
            message: e.without_url().to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError::Body {
            url: redact(url),
            message: e.without_url().to_string(),
        })?;

        debug!(status, bytes = body.len(), "HTTP response read");
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<HttpResponse, TransportError> {
        let request = headers
            .iter()
            .fold(self.client.post(url), |request, (name, value)| {
                request.header(*name, *value)
            })
            .body(body);
        self.execute(url, request).await
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.execute(url, self.client.get(url)).await
    }
}

/// Reduces `url` to scheme, host and port.
///
/// Bot API URLs carry the bot token in the path and webhook URLs may carry
/// Basic auth credentials as `user:password@`, so error values built here
/// must contain neither.
fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return "<invalid url>".to_owned();
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    format!("{scheme}://{host}")
}
