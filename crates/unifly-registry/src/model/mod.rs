// ── Resource item types ──
//
// Typed items stored by the registry. Each type decodes itself from a raw
// controller record and declares how its handler is keyed and fed.

pub mod wlan;

pub use wlan::{Wlan, WlanBand, WlanSecurity};
