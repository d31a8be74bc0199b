// Legacy API client modules
//
// Site-scoped `rest/` access over the controller's legacy (non-OpenAPI)
// endpoints, wrapped in the standard `{ meta: { rc, msg }, data: [...] }`
// envelope. Session establishment happens elsewhere; this client only
// rides an already-authenticated `reqwest::Client`.

pub mod client;
pub mod models;
pub mod records;

pub use client::LegacyClient;
pub use models::RawRecord;
