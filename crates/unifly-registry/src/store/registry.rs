// ── Generic item registry ──
//
// One table per resource type: identifier -> last known typed item.
// Every ingestion classifies the record and notifies matching subscribers
// synchronously, in registration order, before returning.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};
use unifly_api::RawRecord;

use super::subscription::{ItemCallback, SubscriberTable, Unsubscribe};
use crate::config::{HandlerConfig, Resource};
use crate::error::RegistryError;
use crate::event::{ItemChange, ItemEvent};
use crate::stream::{EventFilter, IdFilter, ItemEventStream};

/// Reconciles raw controller records into typed items of one resource type.
///
/// Presence in the table is the only notion of existence: an identifier is
/// added the first time it is ingested, changed on every later ingestion
/// (no content comparison), and deleted only by an explicit removal. Batch
/// ingestion never removes anything.
///
/// Mutation takes `&mut self` and assumes a single writer. Items are handed
/// out as `Arc<T>` snapshots and replaced wholesale on update.
pub struct ItemRegistry<T> {
    pub(crate) config: HandlerConfig<T>,
    items: HashMap<String, Arc<T>>,
    subscribers: SubscriberTable,
}

impl<T> ItemRegistry<T> {
    pub fn new(config: HandlerConfig<T>) -> Self {
        Self {
            config,
            items: HashMap::new(),
            subscribers: SubscriberTable::default(),
        }
    }

    pub fn config(&self) -> &HandlerConfig<T> {
        &self.config
    }

    // ── Ingestion ────────────────────────────────────────────────────

    /// Ingest one record.
    ///
    /// Returns the record's identifier, or `None` when the record has no
    /// usable identifier (nothing stored, nobody notified). A constructor
    /// failure leaves the table untouched and is returned as
    /// [`RegistryError::ItemConstruction`].
    pub fn process_item(&mut self, raw: RawRecord) -> Result<Option<String>, RegistryError> {
        let Some(id) = object_id(&raw, &self.config.key_field) else {
            trace!(key_field = %self.config.key_field, "record without identifier ignored");
            return Ok(None);
        };

        let item = (self.config.constructor)(raw).map_err(|source| {
            warn!(id = %id, error = %source, "constructor rejected record");
            RegistryError::ItemConstruction {
                id: id.clone(),
                source,
            }
        })?;

        let event = match self.items.insert(id.clone(), Arc::new(item)) {
            None => ItemEvent::Added,
            Some(_) => ItemEvent::Changed,
        };
        self.notify(event, &id);

        Ok(Some(id))
    }

    /// Ingest a snapshot, record by record, in order.
    ///
    /// Returns every identifier that was added or changed. Stops at the
    /// first constructor failure; records before it stay applied.
    pub fn process_raw<I>(&mut self, records: I) -> Result<BTreeSet<String>, RegistryError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut touched = BTreeSet::new();
        for raw in records {
            if let Some(id) = self.process_item(raw)? {
                touched.insert(id);
            }
        }
        debug!(
            key_field = %self.config.key_field,
            touched = touched.len(),
            total = self.items.len(),
            "snapshot processed"
        );
        Ok(touched)
    }

    /// Remove the item a record refers to.
    ///
    /// Returns `None` when the record has no identifier or the identifier
    /// is not in the table.
    pub fn remove_item(&mut self, raw: &RawRecord) -> Option<String> {
        let id = object_id(raw, &self.config.key_field)?;
        self.remove(&id)
    }

    /// Remove an item by identifier.
    pub fn remove(&mut self, id: &str) -> Option<String> {
        let (id, _) = self.items.remove_entry(id)?;
        self.notify(ItemEvent::Deleted, &id);
        Some(id)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.items.get(id).map(Arc::clone)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<T>> {
        self.items.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<T>)> {
        self.items.iter().map(|(id, item)| (id.as_str(), item))
    }

    /// All current items (cheap `Arc` clones, unordered).
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.items.values().map(Arc::clone).collect()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register `callback` for changes accepted by both filters.
    ///
    /// ```rust,ignore
    /// let unsub = wlans.subscribe(
    ///     |event, id| println!("{event}: {id}"),
    ///     ItemEvent::Added,
    ///     IdFilter::All,
    /// );
    /// // ...
    /// unsub.unsubscribe();
    /// ```
    pub fn subscribe<F>(
        &self,
        callback: F,
        event_filter: impl Into<EventFilter>,
        id_filter: impl Into<IdFilter>,
    ) -> Unsubscribe
    where
        F: Fn(ItemEvent, &str) + Send + Sync + 'static,
    {
        let callback: ItemCallback = Arc::new(callback);
        self.subscribers
            .insert(callback, event_filter.into(), id_filter.into())
    }

    /// Like [`subscribe`](Self::subscribe), but queue notifications on an
    /// unbounded channel instead of running a callback inline.
    pub fn subscribe_stream(
        &self,
        event_filter: impl Into<EventFilter>,
        id_filter: impl Into<IdFilter>,
    ) -> ItemEventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = self.subscribe(
            move |event, id: &str| {
                // Receiver gone means the stream was dropped mid-delivery.
                let _ = tx.send(ItemChange::new(event, id));
            },
            event_filter,
            id_filter,
        );
        ItemEventStream::new(rx, handle)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscription. Outstanding handles become no-ops.
    pub fn clear_subscribers(&self) {
        self.subscribers.clear();
    }

    fn notify(&self, event: ItemEvent, id: &str) {
        let callbacks = self.subscribers.matching(event, id);
        trace!(id, %event, subscribers = callbacks.len(), "item event");
        for callback in callbacks {
            callback(event, id);
        }
    }
}

impl<T: Resource> ItemRegistry<T> {
    /// A registry for a typed resource, configured from its [`Resource`] impl.
    pub fn for_resource() -> Self {
        Self::new(HandlerConfig::for_resource())
    }
}

impl<T: Resource> Default for ItemRegistry<T> {
    fn default() -> Self {
        Self::for_resource()
    }
}

impl<T> fmt::Debug for ItemRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("config", &self.config)
            .field("items", &self.items.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Extract the identifier from `key_field`.
///
/// Non-empty strings are used as-is and numbers are stringified, so `1` and
/// `"1"` name the same item while `1.0` stays distinct. Anything else
/// (missing, empty, null, bool, nested) is not an identifier.
pub(crate) fn object_id(raw: &RawRecord, key_field: &str) -> Option<String> {
    match raw.get(key_field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;
    use tokio_stream::StreamExt;

    use super::*;

    // ── Helpers ─────────────────────────────────────────────────────

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    /// Registry keyed by `"key"` whose items are the raw records themselves.
    fn raw_registry() -> ItemRegistry<RawRecord> {
        ItemRegistry::new(HandlerConfig::new("key", Ok))
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(ItemEvent, String)>>>);

    impl Recorder {
        fn callback(&self) -> impl Fn(ItemEvent, &str) + Send + Sync + 'static {
            let log = Arc::clone(&self.0);
            move |event, id: &str| log.lock().unwrap().push((event, id.to_owned()))
        }

        fn calls(&self) -> Vec<(ItemEvent, String)> {
            self.0.lock().unwrap().clone()
        }

        fn count(&self) -> usize {
            self.0.lock().unwrap().len()
        }

        fn last(&self) -> Option<(ItemEvent, String)> {
            self.0.lock().unwrap().last().cloned()
        }
    }

    fn call(event: ItemEvent, id: &str) -> Option<(ItemEvent, String)> {
        Some((event, id.to_owned()))
    }

    fn ids(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    // ── Full lifecycle ──────────────────────────────────────────────

    fn assert_lifecycle(event_filter: EventFilter) {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        let unsub = registry.subscribe(rec.callback(), event_filter, IdFilter::All);

        assert_eq!(registry.process_item(record(json!({}))).unwrap(), None);
        assert_eq!(rec.count(), 0);

        assert_eq!(
            registry.process_item(record(json!({ "key": "1" }))).unwrap(),
            Some("1".into())
        );
        assert_eq!(rec.last(), call(ItemEvent::Added, "1"));

        assert_eq!(
            registry.process_item(record(json!({ "key": "1" }))).unwrap(),
            Some("1".into())
        );
        assert_eq!(rec.last(), call(ItemEvent::Changed, "1"));

        assert_eq!(
            registry.remove_item(&record(json!({ "key": "1" }))),
            Some("1".into())
        );
        assert_eq!(rec.last(), call(ItemEvent::Deleted, "1"));

        assert_eq!(registry.remove_item(&record(json!({ "key": "2" }))), None);

        // Snapshots
        assert_eq!(registry.process_raw([record(json!({}))]).unwrap(), ids(&[]));

        assert_eq!(
            registry.process_raw([record(json!({ "key": "2" }))]).unwrap(),
            ids(&["2"])
        );
        assert_eq!(rec.last(), call(ItemEvent::Added, "2"));

        assert_eq!(
            registry.process_raw([record(json!({ "key": "2" }))]).unwrap(),
            ids(&["2"])
        );
        assert_eq!(rec.last(), call(ItemEvent::Changed, "2"));

        assert_eq!(
            registry.remove_item(&record(json!({ "key": "2" }))),
            Some("2".into())
        );
        assert_eq!(rec.last(), call(ItemEvent::Deleted, "2"));
        assert_eq!(rec.count(), 6);

        assert!(unsub.unsubscribe());
        assert!(!unsub.unsubscribe());
        registry.clear_subscribers();
        assert!(!unsub.unsubscribe());
    }

    #[test]
    fn lifecycle_without_event_filter() {
        assert_lifecycle(EventFilter::All);
    }

    #[test]
    fn lifecycle_with_every_kind_listed() {
        assert_lifecycle(EventFilter::from([
            ItemEvent::Added,
            ItemEvent::Changed,
            ItemEvent::Deleted,
        ]));
    }

    #[test]
    fn added_filter_sees_only_additions() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        let unsub = registry.subscribe(rec.callback(), ItemEvent::Added, IdFilter::All);

        registry.process_item(record(json!({}))).unwrap();
        assert_eq!(rec.count(), 0);

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        assert_eq!(rec.last(), call(ItemEvent::Added, "1"));

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        assert_eq!(rec.count(), 1);

        assert_eq!(registry.remove("1"), Some("1".into()));
        assert_eq!(rec.count(), 1);

        registry.process_raw([record(json!({ "key": "2" }))]).unwrap();
        assert_eq!(rec.last(), call(ItemEvent::Added, "2"));
        registry.process_raw([record(json!({ "key": "2" }))]).unwrap();
        registry.remove("2");
        assert_eq!(rec.count(), 2);

        unsub.unsubscribe();
    }

    #[test]
    fn id_filter_ignores_other_identifiers() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        let unsub = registry.subscribe(rec.callback(), EventFilter::All, "1");

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        registry.remove("1");
        assert_eq!(
            rec.calls(),
            vec![
                (ItemEvent::Added, "1".to_owned()),
                (ItemEvent::Changed, "1".to_owned()),
                (ItemEvent::Deleted, "1".to_owned()),
            ]
        );

        registry.process_raw([record(json!({ "key": "2" }))]).unwrap();
        registry.process_raw([record(json!({ "key": "2" }))]).unwrap();
        registry.remove("2");
        assert_eq!(rec.count(), 3);

        unsub.unsubscribe();
    }

    #[test]
    fn add_change_delete_scenario() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        registry.subscribe(rec.callback(), EventFilter::All, IdFilter::All);

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        assert_eq!(rec.last(), call(ItemEvent::Added, "1"));
        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        assert_eq!(rec.last(), call(ItemEvent::Changed, "1"));
        assert_eq!(
            registry.remove_item(&record(json!({ "key": "1" }))),
            Some("1".into())
        );
        assert_eq!(rec.last(), call(ItemEvent::Deleted, "1"));

        assert_eq!(registry.remove_item(&record(json!({ "key": "1" }))), None);
        assert_eq!(rec.count(), 3);
    }

    // ── Ingestion details ───────────────────────────────────────────

    #[derive(Debug, Deserialize, PartialEq)]
    struct Port {
        name: String,
        speed: u32,
    }

    #[test]
    fn lookup_returns_constructed_item() {
        let mut registry = ItemRegistry::new(HandlerConfig::<Port>::deserializing("name"));
        registry
            .process_item(record(json!({ "name": "eth0", "speed": 1000 })))
            .unwrap();

        let port = registry.get("eth0").unwrap();
        assert_eq!(
            *port,
            Port {
                name: "eth0".into(),
                speed: 1000
            }
        );
        assert!(registry.contains("eth0"));
        assert!(registry.get("eth1").is_none());
    }

    #[test]
    fn update_replaces_item_wholesale() {
        let mut registry = ItemRegistry::new(HandlerConfig::<Port>::deserializing("name"));
        registry
            .process_item(record(json!({ "name": "eth0", "speed": 1000 })))
            .unwrap();
        let before = registry.get("eth0").unwrap();

        registry
            .process_item(record(json!({ "name": "eth0", "speed": 10 })))
            .unwrap();

        assert_eq!(before.speed, 1000);
        assert_eq!(registry.get("eth0").unwrap().speed, 10);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn batch_skips_malformed_records() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        registry.subscribe(rec.callback(), EventFilter::All, IdFilter::All);

        let touched = registry
            .process_raw([record(json!({})), record(json!({ "key": "2" }))])
            .unwrap();

        assert_eq!(touched, ids(&["2"]));
        assert_eq!(rec.calls(), vec![(ItemEvent::Added, "2".to_owned())]);
    }

    #[test]
    fn duplicates_within_a_batch_each_fire() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        registry.subscribe(rec.callback(), EventFilter::All, IdFilter::All);

        let touched = registry
            .process_raw([
                record(json!({ "key": "a", "v": 1 })),
                record(json!({ "key": "a", "v": 2 })),
            ])
            .unwrap();

        assert_eq!(touched, ids(&["a"]));
        assert_eq!(
            rec.calls(),
            vec![
                (ItemEvent::Added, "a".to_owned()),
                (ItemEvent::Changed, "a".to_owned()),
            ]
        );
        assert_eq!(registry.get("a").unwrap()["v"], json!(2));
    }

    #[test]
    fn batch_never_removes_missing_items() {
        let mut registry = raw_registry();
        registry
            .process_raw([record(json!({ "key": "a" })), record(json!({ "key": "b" }))])
            .unwrap();
        registry.process_raw([record(json!({ "key": "b" }))]).unwrap();

        let mut keys: Vec<_> = registry.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn identifier_extraction_rules() {
        let key = |v: Value| object_id(&record(json!({ "key": v })), "key");

        assert_eq!(key(json!("abc")), Some("abc".into()));
        assert_eq!(key(json!(42)), Some("42".into()));
        assert_eq!(key(json!("")), None);
        assert_eq!(key(Value::Null), None);
        assert_eq!(key(json!(true)), None);
        assert_eq!(key(json!({ "nested": 1 })), None);
        assert_eq!(object_id(&record(json!({ "other": "x" })), "key"), None);
    }

    #[test]
    fn numeric_and_string_identifiers_share_a_slot() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        registry.subscribe(rec.callback(), EventFilter::All, IdFilter::All);

        registry.process_item(record(json!({ "key": 1 }))).unwrap();
        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        registry.process_item(record(json!({ "key": 1.0 }))).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("1"));
        assert!(registry.contains("1.0"));
        assert_eq!(
            rec.calls(),
            vec![
                (ItemEvent::Added, "1".to_owned()),
                (ItemEvent::Changed, "1".to_owned()),
                (ItemEvent::Added, "1.0".to_owned()),
            ]
        );
    }

    // ── Constructor failures ────────────────────────────────────────

    #[test]
    fn constructor_failure_is_surfaced() {
        let mut registry = ItemRegistry::new(HandlerConfig::<Port>::deserializing("name"));
        let rec = Recorder::default();
        registry.subscribe(rec.callback(), EventFilter::All, IdFilter::All);

        let err = registry
            .process_item(record(json!({ "name": "eth0", "speed": "fast" })))
            .unwrap_err();

        assert!(matches!(err, RegistryError::ItemConstruction { .. }));
        assert_eq!(err.item_id(), Some("eth0"));
        assert!(registry.is_empty());
        assert_eq!(rec.count(), 0);
    }

    #[test]
    fn constructor_failure_keeps_previous_item() {
        let mut registry = ItemRegistry::new(HandlerConfig::<Port>::deserializing("name"));
        registry
            .process_item(record(json!({ "name": "eth0", "speed": 100 })))
            .unwrap();

        assert!(
            registry
                .process_item(record(json!({ "name": "eth0" })))
                .is_err()
        );
        assert_eq!(registry.get("eth0").unwrap().speed, 100);
    }

    #[test]
    fn batch_stops_at_first_failure() {
        let mut registry = ItemRegistry::new(HandlerConfig::<Port>::deserializing("name"));
        let result = registry.process_raw([
            record(json!({ "name": "eth0", "speed": 1 })),
            record(json!({ "name": "eth1" })),
            record(json!({ "name": "eth2", "speed": 3 })),
        ]);

        assert_eq!(result.unwrap_err().item_id(), Some("eth1"));
        assert!(registry.contains("eth0"));
        assert!(!registry.contains("eth2"));
    }

    // ── Subscriber churn ────────────────────────────────────────────

    #[test]
    fn subscribers_fire_in_registration_order() {
        let mut registry = raw_registry();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let order = Arc::clone(&order);
            registry.subscribe(
                move |_, _: &str| order.lock().unwrap().push(n),
                EventFilter::All,
                IdFilter::All,
            );
        }

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn overlapping_subscriptions_fire_independently() {
        let mut registry = raw_registry();
        let a = Recorder::default();
        let b = Recorder::default();
        registry.subscribe(a.callback(), EventFilter::All, IdFilter::All);
        registry.subscribe(b.callback(), EventFilter::All, IdFilter::All);

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        assert_eq!(a.count(), 1);
        assert_eq!(b.count(), 1);
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        let slot: Arc<Mutex<Option<Unsubscribe>>> = Arc::new(Mutex::new(None));

        let inner_slot = Arc::clone(&slot);
        let inner_rec = rec.callback();
        let handle = registry.subscribe(
            move |event, id: &str| {
                inner_rec(event, id);
                if let Some(handle) = inner_slot.lock().unwrap().as_ref() {
                    handle.unsubscribe();
                }
            },
            EventFilter::All,
            IdFilter::All,
        );
        *slot.lock().unwrap() = Some(handle);

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        registry.process_item(record(json!({ "key": "1" }))).unwrap();

        assert_eq!(rec.count(), 1);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn cleared_subscribers_receive_nothing() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        let unsub = registry.subscribe(rec.callback(), EventFilter::All, IdFilter::All);

        registry.clear_subscribers();
        registry.process_item(record(json!({ "key": "1" }))).unwrap();

        assert_eq!(rec.count(), 0);
        assert!(!unsub.is_active());
        assert!(!unsub.unsubscribe());
        assert!(!unsub.unsubscribe());
    }

    #[test]
    fn cancelled_subscription_is_not_redelivered() {
        let mut registry = raw_registry();
        let rec = Recorder::default();
        let unsub = registry.subscribe(rec.callback(), EventFilter::All, IdFilter::All);

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        unsub.unsubscribe();
        unsub.unsubscribe();
        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        registry.remove("1");

        assert_eq!(rec.calls(), vec![(ItemEvent::Added, "1".to_owned())]);
    }

    // ── Queued delivery ─────────────────────────────────────────────

    #[tokio::test]
    async fn stream_receives_matching_changes() {
        let mut registry = raw_registry();
        let mut stream = registry.subscribe_stream(EventFilter::All, "1");

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        registry.process_item(record(json!({ "key": "2" }))).unwrap();
        registry.remove("1");

        assert_eq!(
            stream.next().await,
            Some(ItemChange::new(ItemEvent::Added, "1"))
        );
        assert_eq!(
            stream.next().await,
            Some(ItemChange::new(ItemEvent::Deleted, "1"))
        );
        assert_eq!(stream.try_recv(), None);
    }

    #[test]
    fn stream_is_pending_until_something_happens() {
        let mut registry = raw_registry();
        let mut stream = tokio_test::task::spawn(registry.subscribe_stream(
            ItemEvent::Changed,
            IdFilter::All,
        ));

        tokio_test::assert_pending!(stream.poll_next());

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        tokio_test::assert_pending!(stream.poll_next());

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        assert!(stream.is_woken());
        tokio_test::assert_ready_eq!(
            stream.poll_next(),
            Some(ItemChange::new(ItemEvent::Changed, "1"))
        );
    }

    #[tokio::test]
    async fn stream_ends_after_cancellation() {
        let mut registry = raw_registry();
        let mut stream = registry.subscribe_stream(EventFilter::All, IdFilter::All);

        registry.process_item(record(json!({ "key": "1" }))).unwrap();
        assert!(stream.handle().unsubscribe());
        registry.process_item(record(json!({ "key": "2" }))).unwrap();

        assert_eq!(
            stream.next().await,
            Some(ItemChange::new(ItemEvent::Added, "1"))
        );
        assert_eq!(stream.next().await, None);
    }

    #[test]
    fn dropping_stream_cancels_subscription() {
        let registry = raw_registry();
        let stream = registry.subscribe_stream(EventFilter::All, IdFilter::All);
        assert_eq!(registry.subscriber_count(), 1);

        drop(stream);
        assert_eq!(registry.subscriber_count(), 0);
    }
}
