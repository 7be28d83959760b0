//! Event Handler: turns one submission event into at most one webhook
//! delivery and reports the outcome through the [`Notifier`].
//!
//! ```text
//! map ──fail──▶ notify failure ──▶ Err(Validation)
//!  │
//!  ▼
//! build payload ─▶ send ──ok──▶ notify success ──▶ Ok(Delivered)
//!                    │
//!                    └──fail──▶ notify failure ──▶ Err(Delivery)
//! ```

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::{
    DeliveryError, DeliveryResult, FieldMapping, HandlerError, Notifier, PayloadSource,
    SubmissionEvent, WebhookPayload, WebhookSender,
};

/// A submission that reached the webhook server.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivered {
    /// The payload that was sent.
    pub payload: WebhookPayload,
    /// The webhook server's JSON response.
    pub response: Value,
}

/// Relays submission events.
#[derive(Clone)]
pub struct EventHandler {
    mapping: FieldMapping,
    sender: WebhookSender,
    notifier: Notifier,
}

impl EventHandler {
    /// Wires the mapping rules, the webhook sender and the notifier together.
    pub fn new(mapping: FieldMapping, sender: WebhookSender, notifier: Notifier) -> Self {
        Self {
            mapping,
            sender,
            notifier,
        }
    }

    /// Handles one submission.
    ///
    /// A validation failure returns before any network call other than the
    /// failure notification. Notification failures never change the result.
    #[instrument(skip_all)]
    pub async fn handle(&self, event: &SubmissionEvent) -> Result<Delivered, HandlerError> {
        info!(fields = event.named_values.len(), "Form submission received");

        let result = self.relay(event).await;
        match &result {
            Ok(delivered) => {
                info!(
                    store_id = %delivered.payload.store_id,
                    vehicle_number = %delivered.payload.vehicle_number,
                    "Webhook delivery succeeded"
                );
                self.notifier
                    .notify_delivered(delivered.payload.store_id, &delivered.payload.vehicle_number)
                    .await;
            }
            Err(e) => {
                error!(error = %e, "Form submission could not be relayed");
                self.notifier.notify_failure(e).await;
            }
        }
        result
    }

    async fn relay(&self, event: &SubmissionEvent) -> Result<Delivered, HandlerError> {
        let mapped = self.mapping.map(event)?;
        let payload =
            WebhookPayload::new(mapped.store_id, mapped.vehicle_number, PayloadSource::GoogleForm);
        info!(
            store_id = %payload.store_id,
            vehicle_number = %payload.vehicle_number,
            timestamp = %payload.timestamp,
            "Webhook payload built"
        );

        match self.sender.send(&payload).await {
            DeliveryResult::Delivered { data } => Ok(Delivered {
                payload,
                response: data,
            }),
            DeliveryResult::Failed { error } => Err(DeliveryError(error).into()),
        }
    }
}
