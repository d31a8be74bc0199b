//! Event-feed message decoding.
//!
//! The controller's WebSocket pushes JSON frames shaped like the legacy
//! envelope: `{"meta": {"rc": "ok", "message": "wlanconf:sync"}, "data": [...]}`.
//! Only decoding lives here; connection management belongs to the
//! embedding application.

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::error::Error;
use crate::legacy::RawRecord;

/// The `meta.message` discriminator of an event-feed frame.
///
/// Unrecognized keys are preserved in [`Unknown`](Self::Unknown) rather than
/// rejected, since controllers add new message types with firmware updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKey {
    #[strum(serialize = "device:sync")]
    DeviceSync,
    #[strum(serialize = "sta:sync")]
    ClientSync,
    #[strum(serialize = "user:delete")]
    ClientRemoved,
    #[strum(serialize = "events")]
    Event,
    #[strum(serialize = "wlanconf:add")]
    WlanConfAdded,
    #[strum(serialize = "wlanconf:sync")]
    WlanConfUpdated,
    #[strum(serialize = "wlanconf:delete")]
    WlanConfDeleted,
    #[strum(default)]
    Unknown(String),
}

impl MessageKey {
    /// The wire representation of this key.
    pub fn as_str(&self) -> &str {
        match self {
            Self::DeviceSync => "device:sync",
            Self::ClientSync => "sta:sync",
            Self::ClientRemoved => "user:delete",
            Self::Event => "events",
            Self::WlanConfAdded => "wlanconf:add",
            Self::WlanConfUpdated => "wlanconf:sync",
            Self::WlanConfDeleted => "wlanconf:delete",
            Self::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for MessageKey {
    fn from(raw: String) -> Self {
        // The `default` variant makes parsing infallible.
        raw.parse().unwrap_or(Self::Unknown(raw))
    }
}

impl From<MessageKey> for String {
    fn from(key: MessageKey) -> Self {
        match key {
            MessageKey::Unknown(raw) => raw,
            other => other.as_str().to_owned(),
        }
    }
}

/// Metadata block of an event-feed frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMeta {
    #[serde(default)]
    pub rc: Option<String>,
    pub message: MessageKey,
}

/// A decoded event-feed frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerMessage {
    pub meta: MessageMeta,
    #[serde(default)]
    pub data: Vec<RawRecord>,
}

impl ControllerMessage {
    /// Decode a text frame from the event feed.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: text.to_owned(),
        })
    }

    pub fn key(&self) -> &MessageKey {
        &self.meta.message
    }
}
