// ── WLAN configuration items ──

use serde::{Deserialize, Serialize};
use unifly_api::{MessageKey, RawRecord};

use crate::config::Resource;
use crate::error::ConstructError;

/// Authentication scheme of a WLAN (`security` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum WlanSecurity {
    Open,
    Wep,
    /// WPA personal (pre-shared key).
    Wpapsk,
    /// WPA enterprise (RADIUS).
    Wpaeap,
    Osen,
    #[serde(other)]
    Unknown,
}

/// Radio band(s) a WLAN broadcasts on (`wlan_band` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum WlanBand {
    #[serde(rename = "2g")]
    TwoGhz,
    #[serde(rename = "5g")]
    FiveGhz,
    #[serde(rename = "both")]
    Both,
    #[serde(other)]
    Unknown,
}

/// A WLAN configuration from `rest/wlanconf`.
///
/// Keyed by `name` in its registry; mutating calls address it by `id`.
/// The legacy API is inconsistent about field presence across firmware
/// versions, so everything but the identity is optional or defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wlan {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub site_id: Option<String>,

    // Security
    #[serde(default)]
    pub security: Option<WlanSecurity>,
    #[serde(default)]
    pub wpa_mode: Option<String>,
    #[serde(default)]
    pub wpa_enc: Option<String>,

    // Association
    #[serde(default)]
    pub networkconf_id: Option<String>,
    #[serde(default)]
    pub usergroup_id: Option<String>,
    #[serde(default)]
    pub ap_group_ids: Vec<String>,

    // Radio
    #[serde(default)]
    pub wlan_band: Option<WlanBand>,
    #[serde(default)]
    pub hide_ssid: bool,

    // VLAN
    #[serde(default)]
    pub vlan_enabled: bool,
    #[serde(default)]
    pub vlan: Option<String>,

    // Guest / access control
    #[serde(default)]
    pub is_guest: bool,
    #[serde(default)]
    pub mac_filter_enabled: bool,
    #[serde(default)]
    pub mac_filter_policy: Option<String>,
    #[serde(default)]
    pub mac_filter_list: Vec<String>,
    #[serde(default)]
    pub schedule: Vec<String>,

    /// Catch-all for undocumented fields (passphrases land here too and are
    /// never interpreted).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Wlan {
    pub fn is_open(&self) -> bool {
        matches!(self.security, Some(WlanSecurity::Open))
    }
}

impl Resource for Wlan {
    const KEY_FIELD: &'static str = "name";
    const PATH: &'static str = "rest/wlanconf";

    fn update_messages() -> Vec<MessageKey> {
        vec![MessageKey::WlanConfAdded, MessageKey::WlanConfUpdated]
    }

    fn remove_messages() -> Vec<MessageKey> {
        vec![MessageKey::WlanConfDeleted]
    }

    fn from_raw(raw: RawRecord) -> Result<Self, ConstructError> {
        Ok(serde_json::from_value(serde_json::Value::Object(raw))?)
    }
}
