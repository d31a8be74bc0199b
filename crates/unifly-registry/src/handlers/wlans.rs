// ── WLAN handler ──

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use serde_json::json;
use tracing::debug;
use unifly_api::{LegacyClient, RawRecord};

use crate::config::Resource;
use crate::error::RegistryError;
use crate::model::Wlan;
use crate::store::ItemRegistry;

/// Registry of [`Wlan`]s keyed by name, plus enable/disable calls.
///
/// Derefs to [`ItemRegistry<Wlan>`] for ingestion, lookups and
/// subscriptions.
#[derive(Debug, Default)]
pub struct Wlans {
    registry: ItemRegistry<Wlan>,
}

impl Wlans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a WLAN up by its controller `_id` rather than its name.
    pub fn by_id(&self, id: &str) -> Option<Arc<Wlan>> {
        self.registry.values().find(|wlan| wlan.id == id).cloned()
    }

    /// Turn a WLAN on. Returns the records the controller echoes back.
    ///
    /// The local table is not touched; the change arrives through the
    /// event feed or the next `update()`.
    pub async fn enable(
        &self,
        client: &LegacyClient,
        wlan: &Wlan,
    ) -> Result<Vec<RawRecord>, RegistryError> {
        self.set_enabled(client, wlan, true).await
    }

    /// Turn a WLAN off. Returns the records the controller echoes back.
    pub async fn disable(
        &self,
        client: &LegacyClient,
        wlan: &Wlan,
    ) -> Result<Vec<RawRecord>, RegistryError> {
        self.set_enabled(client, wlan, false).await
    }

    async fn set_enabled(
        &self,
        client: &LegacyClient,
        wlan: &Wlan,
        enabled: bool,
    ) -> Result<Vec<RawRecord>, RegistryError> {
        let path = self.registry.config().path().unwrap_or(Wlan::PATH);
        debug!(wlan = %wlan.name, id = %wlan.id, enabled, "setting WLAN state");
        let echoed = client
            .update_record(path, &wlan.id, &json!({ "enabled": enabled }))
            .await?;
        Ok(echoed)
    }
}

impl Deref for Wlans {
    type Target = ItemRegistry<Wlan>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl DerefMut for Wlans {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}
