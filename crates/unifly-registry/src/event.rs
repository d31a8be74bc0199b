// ── Item change classification ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What happened to an identifier during the most recent ingestion.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemEvent {
    /// The identifier was not in the table and now is.
    Added,
    /// The identifier was re-ingested. Fired unconditionally, even when the
    /// new record is identical to the stored one.
    Changed,
    /// The identifier was removed from the table.
    Deleted,
}

/// A single notification, as delivered through an [`ItemEventStream`](crate::ItemEventStream).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemChange {
    pub event: ItemEvent,
    pub id: String,
}

impl ItemChange {
    pub fn new(event: ItemEvent, id: impl Into<String>) -> Self {
        Self {
            event,
            id: id.into(),
        }
    }
}
