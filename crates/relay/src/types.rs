//! Shared value types for the form relay domain.
//!
//! Unlike the identifiers in [`crate::identifiers`], these types describe whole
//! messages: the inbound [`SubmissionEvent`], the outbound [`WebhookPayload`],
//! and the [`DeliveryResult`] the Webhook Sender hands back to the handler.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{StoreId, VehicleNumber};

// ---------------------------------------------------------------------------
// Inbound event
// ---------------------------------------------------------------------------

/// One form submission as delivered by the trigger.
///
/// `named_values` maps the question label shown on the form to the ordered
/// answers given for it. Checkbox questions may carry several answers; the
/// relay only ever reads the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionEvent {
    /// Field label → submitted values, in submission order.
    #[serde(rename = "namedValues", default)]
    pub named_values: HashMap<String, Vec<String>>,
}

impl SubmissionEvent {
    /// Builds an event from `(label, values)` pairs.
    pub fn from_pairs<I, L, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, Vec<V>)>,
        L: Into<String>,
        V: Into<String>,
    {
        let named_values = pairs
            .into_iter()
            .map(|(label, values)| (label.into(), values.into_iter().map(Into::into).collect()))
            .collect();
        Self { named_values }
    }

    /// Returns the first value submitted for `label`, if any.
    pub fn first_value(&self, label: &str) -> Option<&str> {
        self.named_values
            .get(label)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Serialised as ISO-8601 with millisecond precision and a `Z` suffix
/// (`2026-10-16T09:30:00.000Z`), the format the webhook server expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Formats the timestamp as ISO-8601 (`YYYY-MM-DDTHH:MM:SS.mmmZ`).
    pub fn to_iso8601(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Outbound payload
// ---------------------------------------------------------------------------

/// Where a [`WebhookPayload`] originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSource {
    /// Built from a submitted form.
    GoogleForm,
    /// Built by the manual `test-webhook` entry point.
    ManualTest,
}

/// The JSON body POSTed to the webhook server.
///
/// Constructed fresh per invocation and never mutated afterwards; fields are
/// public for reading and matching only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Target store.
    pub store_id: StoreId,
    /// Trimmed vehicle registration number.
    pub vehicle_number: VehicleNumber,
    /// Moment the payload was built.
    pub timestamp: Timestamp,
    /// Origin of the payload.
    pub source: PayloadSource,
}

impl WebhookPayload {
    /// Builds a payload stamped with the current time.
    pub fn new(store_id: StoreId, vehicle_number: VehicleNumber, source: PayloadSource) -> Self {
        Self {
            store_id,
            vehicle_number,
            timestamp: Timestamp::now(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Delivery result
// ---------------------------------------------------------------------------

/// Outcome of one webhook POST.
///
/// Serialises to `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}` so the manual test entry point can
/// print it as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryResult {
    /// 2xx response with a JSON body.
    Delivered {
        /// Parsed response body.
        data: serde_json::Value,
    },
    /// Non-2xx response, transport failure, or malformed response.
    Failed {
        /// Human-readable description (`"HTTP 500: ..."` for status failures).
        error: String,
    },
}

impl DeliveryResult {
    /// Returns `true` for [`DeliveryResult::Delivered`].
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryResult::Delivered { .. })
    }
}

impl Serialize for DeliveryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DeliveryResult", 2)?;
        match self {
            DeliveryResult::Delivered { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            DeliveryResult::Failed { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
