// ── Item store ──
//
// Per-resource item table with synchronous change notification.

mod refresh;
mod registry;
mod subscription;

pub use registry::ItemRegistry;
pub use subscription::{SubscriptionId, Unsubscribe};
