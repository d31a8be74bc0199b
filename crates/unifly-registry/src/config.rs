// ── Per-resource handler configuration ──
//
// What a resource type plugs into the generic registry. Built in code by
// the resource module (or a test) and handed to `ItemRegistry::new`; the
// registry never reads configuration from disk.

use std::fmt;

use serde::de::DeserializeOwned;
use unifly_api::{MessageKey, RawRecord};

use crate::error::ConstructError;

/// Builds a typed item from a raw controller record (decode-or-reject).
pub type ItemConstructor<T> =
    Box<dyn Fn(RawRecord) -> Result<T, ConstructError> + Send + Sync + 'static>;

/// A typed controller resource with a fixed schema.
///
/// Implementors get a ready-made [`HandlerConfig`] through
/// [`HandlerConfig::for_resource`].
pub trait Resource: Sized + Send + Sync + 'static {
    /// Record field holding the identifier (e.g. `"name"` for WLANs).
    const KEY_FIELD: &'static str;

    /// Site-scoped API path of the collection (e.g. `"rest/wlanconf"`).
    const PATH: &'static str;

    /// Event-feed messages whose records are added or changed items.
    fn update_messages() -> Vec<MessageKey> {
        Vec::new()
    }

    /// Event-feed messages whose records are removed items.
    fn remove_messages() -> Vec<MessageKey> {
        Vec::new()
    }

    fn from_raw(raw: RawRecord) -> Result<Self, ConstructError>;
}

/// Configuration of one [`ItemRegistry`](crate::ItemRegistry).
pub struct HandlerConfig<T> {
    pub(crate) key_field: String,
    pub(crate) constructor: ItemConstructor<T>,
    pub(crate) path: Option<String>,
    pub(crate) update_messages: Vec<MessageKey>,
    pub(crate) remove_messages: Vec<MessageKey>,
}

impl<T> HandlerConfig<T> {
    pub fn new<F>(key_field: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(RawRecord) -> Result<T, ConstructError> + Send + Sync + 'static,
    {
        Self {
            key_field: key_field.into(),
            constructor: Box::new(constructor),
            path: None,
            update_messages: Vec::new(),
            remove_messages: Vec::new(),
        }
    }

    /// Set the site-scoped API path used by `update()`.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_update_messages(mut self, keys: impl IntoIterator<Item = MessageKey>) -> Self {
        self.update_messages.extend(keys);
        self
    }

    pub fn with_remove_messages(mut self, keys: impl IntoIterator<Item = MessageKey>) -> Self {
        self.remove_messages.extend(keys);
        self
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn update_messages(&self) -> &[MessageKey] {
        &self.update_messages
    }

    pub fn remove_messages(&self) -> &[MessageKey] {
        &self.remove_messages
    }
}

impl<T: DeserializeOwned + 'static> HandlerConfig<T> {
    /// A config whose constructor deserializes the record with serde.
    pub fn deserializing(key_field: impl Into<String>) -> Self {
        Self::new(key_field, |raw| {
            serde_json::from_value(serde_json::Value::Object(raw)).map_err(Into::into)
        })
    }
}

impl<T: Resource> HandlerConfig<T> {
    pub fn for_resource() -> Self {
        Self::new(T::KEY_FIELD, T::from_raw)
            .with_path(T::PATH)
            .with_update_messages(T::update_messages())
            .with_remove_messages(T::remove_messages())
    }
}

impl<T> fmt::Debug for HandlerConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerConfig")
            .field("key_field", &self.key_field)
            .field("path", &self.path)
            .field("update_messages", &self.update_messages)
            .field("remove_messages", &self.remove_messages)
            .finish_non_exhaustive()
    }
}
