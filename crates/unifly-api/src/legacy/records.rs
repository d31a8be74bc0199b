// Legacy API `rest/` record endpoints
//
// Generic collection access used by the item registry: list a resource
// collection, or PUT a partial update onto one record of it.

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::RawRecord;

impl LegacyClient {
    /// List every record of a site-scoped collection.
    ///
    /// `GET /api/s/{site}/{path}`, e.g. `rest/wlanconf`.
    pub async fn fetch_records(&self, path: &str) -> Result<Vec<RawRecord>, Error> {
        let url = self.site_url(path)?;
        debug!(path, "fetching records");
        self.get(url).await
    }

    /// Apply a partial update to a single record.
    ///
    /// `PUT /api/s/{site}/{path}/{id}` with `body`. Returns the records the
    /// controller echoes back (usually the updated object).
    pub async fn update_record(
        &self,
        path: &str,
        id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<Vec<RawRecord>, Error> {
        let path = path.trim_end_matches('/');
        let url = self.site_url(&format!("{path}/{id}"))?;
        debug!(path, id, "updating record");
        self.put(url, body).await
    }
}
