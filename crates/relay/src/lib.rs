//! Core domain for the form relay.
//!
//! Relays one form submission to a webhook server and reports the outcome to
//! a Telegram chat. This crate contains the field mapping rules, the three
//! components (Event Handler, Webhook Sender, Notifier), every domain type and
//! error, and the [`HttpClient`] port. Infrastructure crates implement the
//! port; they never add relay rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is sent and when; the `transport` crate defines *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtypes (`StoreId`, `VehicleNumber`, `ChatId`, `BotToken`, `InvocationId`) |
//! | [`types`] | Messages (`SubmissionEvent`, `WebhookPayload`, `DeliveryResult`, `Timestamp`) |
//! | [`errors`] | Handler, notification, transport, and configuration errors |
//! | [`config`] | `RelayConfig`, `TelegramConfig`, `FieldMapping` |
//! | [`ports`] | The [`HttpClient`] trait |
//! | [`mapping`] | Store/vehicle extraction and validation |
//! | [`sender`] | Webhook Sender |
//! | [`notifier`] | Notifier |
//! | [`handler`] | Event Handler |
//! | [`diagnostics`] | Manual test delivery and configuration check |

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod handler;
pub mod identifiers;
pub mod mapping;
pub mod notifier;
pub mod ports;
pub mod sender;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{FieldMapping, RelayConfig, TelegramConfig, WebhookUrl, DEFAULT_TELEGRAM_API_BASE};
pub use diagnostics::{check_configuration, send_test_payload, ConfigurationReport, HealthProbe};
pub use errors::{
    ConfigError, DeliveryError, HandlerError, NotificationError, TransportError, ValidationError,
};
pub use handler::{Delivered, EventHandler};
pub use identifiers::{BotToken, ChatId, EmptyVehicleNumber, InvocationId, StoreId, VehicleNumber};
pub use mapping::MappedSubmission;
pub use notifier::Notifier;
pub use ports::{HttpClient, HttpResponse};
pub use sender::WebhookSender;
pub use types::{DeliveryResult, PayloadSource, SubmissionEvent, Timestamp, WebhookPayload};
