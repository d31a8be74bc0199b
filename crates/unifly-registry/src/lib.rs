//! Typed item tracking for UniFi controller resources.
//!
//! Every resource type the controller exposes (WLANs, clients, devices, ...)
//! is mirrored locally by the same engine:
//!
//! - **[`ItemRegistry<T>`]**: Owns `identifier -> Arc<T>` for one resource
//!   type. Ingests raw controller records one at a time
//!   ([`process_item`](ItemRegistry::process_item)), as full snapshots
//!   ([`process_raw`](ItemRegistry::process_raw)), from the event feed
//!   ([`process_message`](ItemRegistry::process_message)) or by polling
//!   ([`update`](ItemRegistry::update)), and classifies each record as
//!   [`ItemEvent::Added`], [`ItemEvent::Changed`] or [`ItemEvent::Deleted`].
//!
//! - **Subscriptions**: [`subscribe`](ItemRegistry::subscribe) registers a
//!   callback filtered by [`EventFilter`] and [`IdFilter`] and returns an
//!   idempotent [`Unsubscribe`] handle.
//!   [`subscribe_stream`](ItemRegistry::subscribe_stream) hands the same
//!   notifications to an async [`ItemEventStream`] instead.
//!
//! - **[`HandlerConfig<T>`]** / **[`Resource`]**: What a resource type
//!   plugs in: the key field, the raw-to-typed constructor, the API path and
//!   the event-feed message keys it reacts to.
//!
//! - **Resources** ([`model`], [`handlers`]): [`Wlan`] and its [`Wlans`]
//!   handler with enable/disable calls.
//!
//! The registry assumes a single writer: mutation takes `&mut self`, and
//! callbacks run inline before the ingest call returns.

pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{HandlerConfig, ItemConstructor, Resource};
pub use error::{ConstructError, RegistryError};
pub use event::{ItemChange, ItemEvent};
pub use handlers::Wlans;
pub use model::Wlan;
pub use store::{ItemRegistry, SubscriptionId, Unsubscribe};
pub use stream::{EventFilter, IdFilter, ItemEventStream};

pub use unifly_api::RawRecord;
