// ── Queued item notifications ──
//
// Inline callbacks block ingestion until they return. Consumers that want
// isolation subscribe through a channel instead and drain it from their own
// task.

mod filter;

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::event::ItemChange;
use crate::store::Unsubscribe;

pub use filter::{EventFilter, IdFilter};

/// A subscription whose notifications are queued rather than run inline.
///
/// Yields one [`ItemChange`] per matching notification, in delivery order.
/// The stream ends once the subscription is cancelled (and the queue
/// drained) or the registry is dropped. Dropping the stream cancels the
/// subscription.
pub struct ItemEventStream {
    inner: UnboundedReceiverStream<ItemChange>,
    handle: Unsubscribe,
}

impl ItemEventStream {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<ItemChange>, handle: Unsubscribe) -> Self {
        Self {
            inner: UnboundedReceiverStream::new(receiver),
            handle,
        }
    }

    /// The cancellation handle of the underlying subscription.
    pub fn handle(&self) -> &Unsubscribe {
        &self.handle
    }

    /// Take the next queued notification without waiting.
    pub fn try_recv(&mut self) -> Option<ItemChange> {
        self.inner.as_mut().try_recv().ok()
    }
}

impl Stream for ItemEventStream {
    type Item = ItemChange;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for ItemEventStream {
    fn drop(&mut self) {
        self.handle.unsubscribe();
    }
}
