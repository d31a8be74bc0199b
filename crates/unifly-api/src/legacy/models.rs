// Legacy API response types
//
// The envelope is the only typed structure at this layer. Payload rows stay
// as `RawRecord`s so each resource handler can decide how to type them.

use serde::Deserialize;

/// An untyped controller record: one element of an envelope's `data` array.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Standard UniFi legacy API response envelope.
///
/// ```json
/// { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct LegacyResponse<T> {
    pub meta: Meta,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Metadata from the legacy envelope. `rc` == `"ok"` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

/// UniFi OS wraps some errors as `{"error":{"code":N,"message":"..."}}` with HTTP 200.
#[derive(Debug, Deserialize)]
pub(crate) struct UnifiOsError {
    pub error: Option<UnifiOsErrorInner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnifiOsErrorInner {
    pub code: u16,
    pub message: Option<String>,
}
