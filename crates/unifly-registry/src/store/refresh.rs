// ── Snapshot refresh and event-feed application ──
//
// The two inbound paths from the controller: polling the handler's
// collection for a full snapshot, and routing decoded event-feed messages
// to ingestion or removal by message key.

use std::collections::BTreeSet;

use tracing::{debug, trace};
use unifly_api::{ControllerMessage, LegacyClient};

use super::ItemRegistry;
use crate::error::RegistryError;

impl<T> ItemRegistry<T> {
    /// Fetch the handler's collection and ingest it as a snapshot.
    ///
    /// Returns the identifiers added or changed. Items missing from the
    /// snapshot are kept; removals only arrive through the event feed.
    pub async fn update(&mut self, client: &LegacyClient) -> Result<BTreeSet<String>, RegistryError> {
        let Some(path) = self.config.path.clone() else {
            return Err(RegistryError::MissingPath {
                key_field: self.config.key_field.clone(),
            });
        };

        let records = client.fetch_records(&path).await?;
        debug!(path = %path, count = records.len(), "applying snapshot");
        self.process_raw(records)
    }

    /// Apply one event-feed message.
    ///
    /// Update keys ingest the message's records, removal keys remove them;
    /// any other key is ignored. Returns the identifiers affected.
    pub fn process_message(
        &mut self,
        message: ControllerMessage,
    ) -> Result<BTreeSet<String>, RegistryError> {
        let key = &message.meta.message;

        if self.config.update_messages.contains(key) {
            return self.process_raw(message.data);
        }

        if self.config.remove_messages.contains(key) {
            let removed = message
                .data
                .iter()
                .filter_map(|raw| self.remove_item(raw))
                .collect();
            return Ok(removed);
        }

        trace!(%key, "message not handled");
        Ok(BTreeSet::new())
    }
}
