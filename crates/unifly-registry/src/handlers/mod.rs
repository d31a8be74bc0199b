// ── Resource handlers ──
//
// Registries specialised to one resource type, adding the controller
// calls that act on that resource.

pub mod wlans;

pub use wlans::Wlans;
