// ── Registry error types ──
//
// Malformed records and unknown removal targets never reach this type:
// they are absorbed by the registry and reported as `None`. What remains
// are caller-fixable defects (a constructor rejecting a record, a handler
// without a path) and transport failures during refresh or mutation.

use thiserror::Error;

/// Error produced by a resource constructor that cannot type a record.
pub type ConstructError = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for the registry crate.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The resource constructor rejected a record with a valid identifier.
    #[error("Cannot construct item {id:?}: {source}")]
    ItemConstruction {
        id: String,
        #[source]
        source: ConstructError,
    },

    /// `update()` was called on a handler that has no API path.
    #[error("Handler keyed by {key_field:?} has no API path configured")]
    MissingPath { key_field: String },

    /// Transport failure talking to the controller.
    #[error(transparent)]
    Api(#[from] unifly_api::Error),
}

impl RegistryError {
    /// The identifier of the record that failed to construct, if any.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::ItemConstruction { id, .. } => Some(id),
            _ => None,
        }
    }
}
