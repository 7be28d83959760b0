//! Notifier: best-effort status messages to a Telegram chat.
//!
//! [`Notifier::notify`] never fails from the caller's point of view. Missing
//! credentials make it a logged no-op; transport failures and Bot API
//! rejections are logged and dropped.
//!
//! The `sendMessage` URL embeds the bot token, so neither the URL nor a
//! [`TransportError`] built from it is ever logged here; failures are logged
//! by kind and status only.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::ports::JSON_CONTENT_TYPE;
use crate::{HttpClient, NotificationError, StoreId, TelegramConfig, TransportError, VehicleNumber};

/// Body of a Bot API `sendMessage` call.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Sends status messages about relayed submissions.
#[derive(Clone)]
pub struct Notifier {
    client: Arc<dyn HttpClient>,
    telegram: Option<TelegramConfig>,
}

impl Notifier {
    /// Creates a notifier. `telegram = None` turns every call into a no-op.
    pub fn new(client: Arc<dyn HttpClient>, telegram: Option<TelegramConfig>) -> Self {
        Self { client, telegram }
    }

    /// Returns `true` when credentials are configured.
    pub fn is_enabled(&self) -> bool {
        self.telegram.is_some()
    }

    /// Sends `text`, logging and discarding any failure.
    pub async fn notify(&self, text: &str) {
        let Some(telegram) = &self.telegram else {
            info!("Telegram is not configured; skipping notification");
            return;
        };

        match self.try_send(telegram, text).await {
            Ok(()) => info!("Telegram notification sent"),
            Err(NotificationError::Transport(e)) => {
                warn!(kind = transport_kind(&e), "Failed to reach Telegram Bot API")
            }
            Err(NotificationError::Rejected { status, body }) => {
                warn!(status, body = %body, "Telegram Bot API rejected notification")
            }
        }
    }

    /// Reports a successfully relayed submission.
    pub async fn notify_delivered(&self, store_id: StoreId, vehicle_number: &VehicleNumber) {
        self.notify(&success_message(store_id, vehicle_number)).await;
    }

    /// Reports a validation or delivery failure.
    pub async fn notify_failure(&self, error: &(dyn std::error::Error + Send + Sync)) {
        self.notify(&failure_message(error)).await;
    }

    async fn try_send(&self, telegram: &TelegramConfig, text: &str) -> Result<(), NotificationError> {
        let body = SendMessage {
            chat_id: telegram.chat_id.as_str(),
            text,
            parse_mode: "HTML",
        };
        // A struct of string slices always serialises.
        let body = serde_json::to_string(&body).unwrap_or_default();

        let response = self
            .client
            .post(&telegram.send_message_url(), &[JSON_CONTENT_TYPE], body)
            .await?;

        if response.is_success() {
            Ok(())
        } else {
            Err(NotificationError::Rejected {
                status: response.status,
                body: response.body,
            })
        }
    }
}

fn transport_kind(error: &TransportError) -> &'static str {
    match error {
        TransportError::Request { .. } => "request",
        TransportError::Body { .. } => "body",
    }
}

/// Text of the message sent after a successful delivery.
pub fn success_message(store_id: StoreId, vehicle_number: &VehicleNumber) -> String {
    format!(
        "✅ 자동화 요청 전송 완료\n매장: {store_id}\n차량: {}",
        escape_html(vehicle_number.as_str())
    )
}

/// Text of the message sent after a failed invocation.
pub fn failure_message(error: &dyn std::error::Error) -> String {
    format!("❌ 폼 처리 오류: {}", escape_html(&error.to_string()))
}

/// Escapes the characters the Bot API's HTML parse mode treats as markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
