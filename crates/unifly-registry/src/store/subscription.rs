// ── Subscriber table ──
//
// Subscriptions are keyed by a monotonically increasing id and kept in
// registration order. Cancellation handles hold only a weak reference, so
// they stay valid (as no-ops) after the table is cleared or the registry
// is dropped.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use indexmap::IndexMap;
use tracing::trace;

use crate::event::ItemEvent;
use crate::stream::{EventFilter, IdFilter};

/// Callback invoked with the kind and identifier of each matching change.
pub(crate) type ItemCallback = Arc<dyn Fn(ItemEvent, &str) + Send + Sync>;

/// Identifies one subscription within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

struct Subscriber {
    callback: ItemCallback,
    event_filter: EventFilter,
    id_filter: IdFilter,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: IndexMap<SubscriptionId, Subscriber>,
}

type SharedSubscribers = Mutex<Subscribers>;

fn lock(table: &SharedSubscribers) -> MutexGuard<'_, Subscribers> {
    // A panicking callback never runs under this lock, so the data is intact.
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The registry's side of the subscriber table.
#[derive(Default)]
pub(crate) struct SubscriberTable {
    inner: Arc<SharedSubscribers>,
}

impl SubscriberTable {
    pub(crate) fn insert(
        &self,
        callback: ItemCallback,
        event_filter: EventFilter,
        id_filter: IdFilter,
    ) -> Unsubscribe {
        let mut table = lock(&self.inner);
        table.next_id += 1;
        let id = SubscriptionId(table.next_id);
        trace!(%id, ?event_filter, ?id_filter, "subscription added");
        table.entries.insert(
            id,
            Subscriber {
                callback,
                event_filter,
                id_filter,
            },
        );

        Unsubscribe {
            id,
            table: Arc::downgrade(&self.inner),
        }
    }

    /// Callbacks accepting `(event, id)`, in registration order.
    ///
    /// Collected under the lock and returned so the caller can invoke them
    /// after releasing it; callbacks may then subscribe or cancel freely.
    pub(crate) fn matching(&self, event: ItemEvent, id: &str) -> Vec<ItemCallback> {
        lock(&self.inner)
            .entries
            .values()
            .filter(|sub| sub.event_filter.matches(event) && sub.id_filter.matches(id))
            .map(|sub| Arc::clone(&sub.callback))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub(crate) fn clear(&self) {
        lock(&self.inner).entries.clear();
    }
}

/// Cancellation handle returned by `subscribe`.
///
/// Dropping the handle does not cancel the subscription. Calling
/// [`unsubscribe`](Self::unsubscribe) more than once, after the subscriber
/// table was cleared, or after the registry was dropped is a no-op.
#[derive(Debug, Clone)]
pub struct Unsubscribe {
    id: SubscriptionId,
    table: Weak<SharedSubscribers>,
}

impl Unsubscribe {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Cancel the subscription. Returns `true` only for the call that
    /// actually removed it.
    pub fn unsubscribe(&self) -> bool {
        let Some(table) = self.table.upgrade() else {
            return false;
        };
        let removed = lock(&table).entries.shift_remove(&self.id);
        // The removed callback (and anything it owns) drops here, outside the lock.
        if removed.is_some() {
            trace!(id = %self.id, "subscription cancelled");
        }
        removed.is_some()
    }

    /// Whether the subscription is still registered.
    pub fn is_active(&self) -> bool {
        let Some(table) = self.table.upgrade() else {
            return false;
        };
        lock(&table).entries.contains_key(&self.id)
    }
}
