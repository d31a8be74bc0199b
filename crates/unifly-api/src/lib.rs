//! Transport collaborator for the unifly item registry.
//!
//! A deliberately small slice of the UniFi controller's legacy API:
//!
//! - **[`LegacyClient`]**: site-scoped `rest/` access with `{ meta, data }`
//!   envelope unwrapping and CSRF handling. Records come back untyped as
//!   [`RawRecord`]s; typing them is the registry's job.
//! - **[`ControllerMessage`]**: decoded event-feed payloads keyed by
//!   [`MessageKey`].
//! - **[`TransportConfig`]**: TLS and timeout settings for building the
//!   underlying `reqwest::Client`.

pub mod auth;
pub mod error;
pub mod legacy;
pub mod messages;
pub mod transport;

pub use auth::ControllerPlatform;
pub use error::Error;
pub use legacy::{LegacyClient, RawRecord};
pub use messages::{ControllerMessage, MessageKey, MessageMeta};
pub use transport::{TlsMode, TransportConfig};
