//! Manual entry points: a fixed test delivery and a configuration check.
//!
//! Neither is reached from the event path. Operators run them to verify the
//! webhook server is reachable without submitting a real form.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::strip_userinfo;
use crate::{
    DeliveryResult, HttpClient, PayloadSource, RelayConfig, StoreId, VehicleNumber,
    WebhookPayload, WebhookSender,
};

/// Vehicle number used by [`send_test_payload`].
pub const TEST_VEHICLE_NUMBER: &str = "12가3456";

/// Builds the fixed payload sent by the manual test.
pub fn test_payload() -> WebhookPayload {
    WebhookPayload::new(
        StoreId::A,
        VehicleNumber::from_static(TEST_VEHICLE_NUMBER),
        PayloadSource::ManualTest,
    )
}

/// Sends the fixed test payload through the Webhook Sender.
pub async fn send_test_payload(sender: &WebhookSender) -> DeliveryResult {
    let payload = test_payload();
    info!(
        store_id = %payload.store_id,
        vehicle_number = %payload.vehicle_number,
        "Sending manual test payload"
    );
    let result = sender.send(&payload).await;
    info!(success = result.is_success(), "Manual test finished");
    result
}

// ---------------------------------------------------------------------------
// Configuration check
// ---------------------------------------------------------------------------

/// Result of probing the webhook server's health URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthProbe {
    /// The server answered; carries status and body text.
    Reachable {
        /// HTTP status of the health response.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The server could not be reached.
    Unreachable {
        /// Transport error text.
        error: String,
    },
}

/// Configuration state and connectivity, as printed by `check-config`.
///
/// Secrets are reduced to configured/not-configured flags, and URL
/// credentials are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationReport {
    /// Webhook URL without credentials.
    pub webhook_url: String,
    /// Health URL that was probed, without credentials.
    pub health_url: String,
    /// Whether a bot token is set.
    pub bot_token_configured: bool,
    /// Whether a chat id is set.
    pub chat_id_configured: bool,
    /// Outcome of the health probe.
    pub health: HealthProbe,
}

impl std::fmt::Display for ConfigurationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn state(configured: bool) -> &'static str {
            if configured {
                "configured"
            } else {
                "not configured"
            }
        }

        writeln!(f, "=== Configuration ===")?;
        writeln!(f, "Webhook URL:        {}", self.webhook_url)?;
        writeln!(f, "Telegram bot token: {}", state(self.bot_token_configured))?;
        writeln!(f, "Telegram chat ID:   {}", state(self.chat_id_configured))?;
        match &self.health {
            HealthProbe::Reachable { status, body } => {
                write!(f, "Webhook server ({}): HTTP {status} {body}", self.health_url)
            }
            HealthProbe::Unreachable { error } => {
                write!(f, "Webhook server ({}) unreachable: {error}", self.health_url)
            }
        }
    }
}

/// Reports configuration state and probes the health URL with a GET.
pub async fn check_configuration(
    config: &RelayConfig,
    client: Arc<dyn HttpClient>,
) -> ConfigurationReport {
    let health_url = config.webhook_url.health_url();
    let health = match client.get(&health_url).await {
        Ok(response) => {
            info!(status = response.status, "Webhook server health probe answered");
            HealthProbe::Reachable {
                status: response.status,
                body: response.body,
            }
        }
        Err(e) => {
            warn!(error = %e, "Webhook server health probe failed");
            HealthProbe::Unreachable {
                error: e.to_string(),
            }
        }
    };

    ConfigurationReport {
        webhook_url: config.webhook_url.redacted(),
        health_url: strip_userinfo(&health_url),
        bot_token_configured: config.bot_token.is_some(),
        chat_id_configured: config.chat_id.is_some(),
        health,
    }
}
