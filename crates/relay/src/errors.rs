//! Error types for the form relay domain.
//!
//! Exactly one error class can escape the Event Handler per invocation:
//! [`HandlerError`], which is either a [`ValidationError`] or a
//! [`DeliveryError`]. [`NotificationError`] is produced and consumed inside the
//! Notifier and never crosses that boundary. [`TransportError`] is what an
//! [`crate::HttpClient`] implementation reports; the Webhook Sender folds it
//! into a [`crate::DeliveryResult`].

use thiserror::Error;

// ---------------------------------------------------------------------------
// Handler errors
// ---------------------------------------------------------------------------

/// A required field was absent or could not be mapped.
///
/// Carries both mapped values (empty when unmapped) so the failure message
/// shows exactly what the form produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("필수 데이터 누락 - 매장: {store_id}, 차량번호: {vehicle_number}")]
pub struct ValidationError {
    /// Mapped store id, or `""` when the selection matched no store.
    pub store_id: String,
    /// Trimmed vehicle number, or `""` when absent.
    pub vehicle_number: String,
}

/// The webhook server did not accept the payload.
///
/// Wraps the error text of a failed [`crate::DeliveryResult`]: either
/// `"HTTP <code>: <body>"` or a transport/parse message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("웹훅 전송 실패: {0}")]
pub struct DeliveryError(pub String);

/// Errors that escape [`crate::EventHandler::handle`].
///
/// By the time a caller sees one of these, the Notifier has already been given
/// the chance to report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Field extraction or validation failed; no network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payload was built but the webhook POST failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

// ---------------------------------------------------------------------------
// Infrastructure-facing errors
// ---------------------------------------------------------------------------

/// A failure below the HTTP status level: the request never produced a
/// response that could be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, TLS failure, timeout.
    #[error("request to {url} failed: {message}")]
    Request {
        /// Scheme, host and port of the target. [`HttpClient`](crate::HttpClient)
        /// implementations drop the path, query and any `user:password@` part.
        url: String,
        /// Underlying client error message.
        message: String,
    },

    /// A response arrived but its body could not be read.
    #[error("failed to read response body from {url}: {message}")]
    Body {
        /// Scheme, host and port of the target, as for `Request`.
        url: String,
        /// Underlying client error message.
        message: String,
    },
}

/// A status notification could not be delivered.
///
/// Always contained: logged by the Notifier and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// The Bot API could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The Bot API answered with a non-2xx status (e.g. invalid token).
    #[error("Bot API returned HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response text.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// The relay configuration is invalid.
///
/// Produced at load time; the relay never starts with an invalid config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No webhook URL was supplied by any configuration source.
    #[error("webhook URL is not configured")]
    MissingWebhookUrl,

    /// The webhook URL is not an absolute `http://` or `https://` URL.
    #[error("webhook URL must start with http:// or https://, got '{0}'")]
    InvalidWebhookUrl(String),
}
