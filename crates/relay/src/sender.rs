//! Webhook Sender: one JSON POST to the webhook server, classified into a
//! [`DeliveryResult`].
//!
//! The sender never returns an error. Serialisation failures, transport
//! failures, non-2xx statuses and 2xx responses with a non-JSON body all come
//! back as [`DeliveryResult::Failed`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ports::JSON_CONTENT_TYPE;
use crate::{DeliveryResult, HttpClient, WebhookUrl};

/// Posts payloads to the configured webhook URL.
#[derive(Clone)]
pub struct WebhookSender {
    client: Arc<dyn HttpClient>,
    url: WebhookUrl,
}

impl WebhookSender {
    /// Creates a sender that posts to `url` through `client`.
    pub fn new(client: Arc<dyn HttpClient>, url: WebhookUrl) -> Self {
        Self { client, url }
    }

    /// The URL this sender posts to.
    pub fn url(&self) -> &WebhookUrl {
        &self.url
    }

    /// Serialises `payload`, POSTs it, and classifies the response.
    pub async fn send<T: Serialize + ?Sized>(&self, payload: &T) -> DeliveryResult {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to serialise webhook payload");
                return DeliveryResult::Failed {
                    error: e.to_string(),
                };
            }
        };

        info!(url = %self.url.redacted(), "Sending webhook request");
        let response = match self
            .client
            .post(self.url.as_str(), &[JSON_CONTENT_TYPE], body)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Webhook request failed");
                return DeliveryResult::Failed {
                    error: e.to_string(),
                };
            }
        };

        info!(status = response.status, body = %response.body, "Webhook response received");

        if !response.is_success() {
            return DeliveryResult::Failed {
                error: format!("HTTP {}: {}", response.status, response.body),
            };
        }

        match serde_json::from_str(&response.body) {
            Ok(data) => DeliveryResult::Delivered { data },
            Err(e) => {
                debug!(error = %e, "Webhook returned a non-JSON success body");
                DeliveryResult::Failed {
                    error: format!("invalid JSON in webhook response: {e}"),
                }
            }
        }
    }
}
