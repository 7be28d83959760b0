//! Newtype domain identifiers.
//!
//! Every value that crosses a boundary with a validity rule (non-empty,
//! trimmed, one of a closed set) is represented as a distinct type. A
//! [`VehicleNumber`] can therefore never be confused with a [`ChatId`] even
//! though both are strings on the wire, and an unmapped store selection cannot
//! reach a [`crate::WebhookPayload`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Store selection
// ---------------------------------------------------------------------------

/// The store a submission is addressed to.
///
/// Serialised as the bare letter (`"A"` / `"B"`). The empty store id that the
/// wire schema permits is modelled as `Option::<StoreId>::None` and is rejected
/// by validation before any payload is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreId {
    /// Store A.
    A,
    /// Store B.
    B,
}

impl StoreId {
    /// Returns the wire representation of this store.
    pub fn as_str(self) -> &'static str {
        match self {
            StoreId::A => "A",
            StoreId::B => "B",
        }
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// A vehicle registration number as submitted on the form (e.g. `"12가3456"`).
///
/// Always trimmed of leading and trailing whitespace and never empty.
/// Deserialisation goes through [`VehicleNumber::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct VehicleNumber(String);

impl VehicleNumber {
    /// Trims `raw` and wraps it, returning `None` if nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Wraps a literal that is already trimmed and non-empty.
    pub(crate) fn from_static(value: &'static str) -> Self {
        debug_assert!(!value.is_empty() && value.trim() == value);
        Self(value.to_owned())
    }

    /// Returns the vehicle number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VehicleNumber {
    type Error = EmptyVehicleNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(EmptyVehicleNumber)
    }
}

impl From<VehicleNumber> for String {
    fn from(value: VehicleNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for VehicleNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vehicle number was empty or whitespace only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("vehicle number is empty")]
pub struct EmptyVehicleNumber;

// ---------------------------------------------------------------------------
// Notification identifiers
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies the Telegram chat that receives status notifications.
    ///
    /// Numeric for private chats and groups, `@channelname` for channels; kept
    /// as text because both forms are accepted by the Bot API.
    ChatId
}

/// A Telegram bot token (`<bot id>:<secret>`).
///
/// The token is a credential: `Debug` is redacted and there is no `Display`
/// impl, so it cannot end up in a log line by accident.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BotToken(String);

impl BotToken {
    /// Creates a new token, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the raw token. Only the Bot API URL builder should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BotToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BotToken(***)")
    }
}

// ---------------------------------------------------------------------------
// Identifiers, UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single relay invocation (one submitted form, one CLI run).
///
/// Generated fresh for every CLI invocation and recorded on the root span so
/// all log lines from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a new random invocation identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
