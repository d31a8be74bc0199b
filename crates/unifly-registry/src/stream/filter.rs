// ── Subscription filter predicates ──
//
// A subscription fires only when both its event filter and its id filter
// accept the notification.

use std::collections::{BTreeSet, HashSet};

use strum::IntoEnumIterator;

use crate::event::ItemEvent;

/// Which event kinds a subscription wants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    /// Only these kinds. An empty set accepts nothing.
    Kinds(BTreeSet<ItemEvent>),
}

impl EventFilter {
    pub fn matches(&self, event: ItemEvent) -> bool {
        match self {
            Self::All => true,
            Self::Kinds(kinds) => kinds.contains(&event),
        }
    }

    /// The accepted kinds, expanded.
    pub fn kinds(&self) -> BTreeSet<ItemEvent> {
        match self {
            Self::All => ItemEvent::iter().collect(),
            Self::Kinds(kinds) => kinds.clone(),
        }
    }
}

impl From<ItemEvent> for EventFilter {
    fn from(event: ItemEvent) -> Self {
        Self::Kinds(BTreeSet::from([event]))
    }
}

impl<const N: usize> From<[ItemEvent; N]> for EventFilter {
    fn from(events: [ItemEvent; N]) -> Self {
        Self::Kinds(events.into_iter().collect())
    }
}

impl From<BTreeSet<ItemEvent>> for EventFilter {
    fn from(events: BTreeSet<ItemEvent>) -> Self {
        Self::Kinds(events)
    }
}

impl From<HashSet<ItemEvent>> for EventFilter {
    fn from(events: HashSet<ItemEvent>) -> Self {
        Self::Kinds(events.into_iter().collect())
    }
}

impl<T: Into<EventFilter>> From<Option<T>> for EventFilter {
    fn from(filter: Option<T>) -> Self {
        filter.map_or(Self::All, Into::into)
    }
}

/// Which identifiers a subscription wants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdFilter {
    #[default]
    All,
    Only(String),
}

impl IdFilter {
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == id,
        }
    }
}

impl From<&str> for IdFilter {
    fn from(id: &str) -> Self {
        Self::Only(id.to_owned())
    }
}

impl From<String> for IdFilter {
    fn from(id: String) -> Self {
        Self::Only(id)
    }
}

impl<T: Into<IdFilter>> From<Option<T>> for IdFilter {
    fn from(filter: Option<T>) -> Self {
        filter.map_or(Self::All, Into::into)
    }
}
