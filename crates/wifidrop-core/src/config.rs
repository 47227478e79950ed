//! Configuration resolution for WifiDrop.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global settings file (~/.config/wifidrop/settings.json)
//! 3. Environment variables
//! 4. CLI arguments (highest priority, applied by the binary)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Complete WifiDrop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub log: LogSettings,
}

/// Remote credential store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Project base URL (e.g., "<https://abc123.supabase.co>").
    pub url: String,
    /// Anon/service key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Table holding the shared credentials.
    pub table: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            table: "wifi_passwords".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            let global = load_config_file(&global_path)?;
            tracing::debug!(path = %global_path.display(), "Loaded settings file");
            merge_config(&mut config, global);
        }
    }

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the global settings file path.
pub fn global_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|h| PathBuf::from(h).join(".wifidrop").join("settings.json"))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support/wifidrop/settings.json"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|p| p.join("wifidrop").join("settings.json"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

/// Parse a settings file from disk.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn merge_config(base: &mut Config, overlay: Config) {
    // Store settings: a file may set any subset; empty strings mean "unset"
    // and do not clobber values from a lower layer.
    if !overlay.store.url.is_empty() {
        base.store.url = overlay.store.url;
    }
    if !overlay.store.api_key.is_empty() {
        base.store.api_key = overlay.store.api_key;
    }
    if !overlay.store.table.is_empty() {
        base.store.table = overlay.store.table;
    }

    base.log = overlay.log;
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(val) = std::env::var("WIFIDROP_STORE_URL") {
        config.store.url = val;
    }
    if let Ok(val) = std::env::var("WIFIDROP_STORE_KEY") {
        config.store.api_key = val;
    }
    if let Ok(val) = std::env::var("WIFIDROP_STORE_TABLE") {
        config.store.table = val;
    }
    if let Ok(val) = std::env::var("WIFIDROP_LOG_LEVEL") {
        config.log.level = val;
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_targets_wifi_passwords_table() {
        let config = Config::default();
        assert_eq!(config.store.table, "wifi_passwords");
        assert!(config.store.url.is_empty());
    }

    #[test]
    fn default_log_level_is_warn() {
        let config = Config::default();
        assert_eq!(config.log.level, "warn");
        assert!(!config.log.json);
    }

    #[test]
    fn settings_file_round_trips() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"store":{{"url":"https://abc.supabase.co","api_key":"anon","table":"wifi_passwords"}}}}"#
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.store.url, "https://abc.supabase.co");
        assert_eq!(config.store.api_key, "anon");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn malformed_settings_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_config_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn merge_skips_unset_store_fields() {
        let mut base = Config::default();
        base.store.url = "https://base.supabase.co".to_string();

        let overlay = Config {
            store: StoreSettings {
                url: String::new(),
                api_key: "overlay-key".to_string(),
                table: String::new(),
            },
            log: LogSettings::default(),
        };

        merge_config(&mut base, overlay);
        assert_eq!(base.store.url, "https://base.supabase.co");
        assert_eq!(base.store.api_key, "overlay-key");
        assert_eq!(base.store.table, "wifi_passwords");
    }
}
