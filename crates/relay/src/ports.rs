//! Port traits implemented by infrastructure crates.
//!
//! The relay domain performs no I/O of its own. Every outbound request goes
//! through [`HttpClient`]; the `transport` crate supplies the production
//! implementation and tests supply a recording fake.

use async_trait::async_trait;

use crate::TransportError;

/// `Content-Type` header sent with every JSON body.
pub const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Status code and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl HttpResponse {
    /// Returns `true` for status codes in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP capability used by the relay.
///
/// Implementations must return `Ok` for every response that was received,
/// whatever its status; `Err` is reserved for failures where no readable
/// response exists.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a POST with the given headers and body.
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<HttpResponse, TransportError>;

    /// Sends a GET with no body.
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}
