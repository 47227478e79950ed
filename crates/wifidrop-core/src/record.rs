//! WiFi credential records shared between the store gateway and the UI.

use serde::{Deserialize, Serialize};

/// One shared WiFi network entry as stored in the `wifi_passwords` table.
///
/// The id is assigned by the store on insert and never set by the client.
/// Venue and location fields are free text and may be absent on rows
/// created by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiCredential {
    pub id: i64,
    pub network_name: String,
    pub password: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl WifiCredential {
    /// Case-insensitive substring match of `term` against the network name.
    ///
    /// An empty term matches every record. Only the network name is
    /// searched; venue and location fields are ignored.
    pub fn matches_search(&self, term: &str) -> bool {
        term.is_empty()
            || self
                .network_name
                .to_lowercase()
                .contains(&term.to_lowercase())
    }
}

/// Insert payload for a new credential.
///
/// All six fields are always serialized, empty strings included, so the row
/// lands in the store exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewWifiCredential {
    pub network_name: String,
    pub password: String,
    pub business_name: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Project `records` down to those whose network name contains `term`,
/// ignoring case. Preserves the input order and never mutates the list.
pub fn filter_by_network<'a>(
    records: &'a [WifiCredential],
    term: &str,
) -> Vec<&'a WifiCredential> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.network_name.to_lowercase().contains(&needle))
        .collect()
}
