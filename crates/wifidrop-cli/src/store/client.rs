//! Supabase/PostgREST credential store client.
//!
//! Uses reqwest to issue the only two request shapes the app needs: an
//! unfiltered select-all and a single-row insert returning the created row.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use thiserror::Error;

use wifidrop_core::{NewWifiCredential, WifiCredential};

/// Credential store client errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store returned no row for the insert")]
    EmptyReply,
}

/// Connection settings for the remote store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL (e.g., "<https://abc123.supabase.co>").
    pub base_url: String,
    /// Anon key, sent as `apikey` and as the bearer token.
    pub api_key: String,
    /// Table holding the shared credentials.
    pub table: String,
}

/// PostgREST client for the shared-credentials table.
#[derive(Debug)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    table: String,
}

impl StoreClient {
    /// Create a new store client with the auth headers installed as defaults.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.base_url.is_empty() {
            return Err(StoreError::Config("store url is empty".into()));
        }
        if config.api_key.is_empty() {
            return Err(StoreError::Config("api key is empty".into()));
        }
        if config.table.is_empty() {
            return Err(StoreError::Config("table name is empty".into()));
        }

        let mut headers = HeaderMap::new();
        let key_val = HeaderValue::from_str(&config.api_key)
            .map_err(|_| StoreError::Config("Invalid api key format".into()))?;
        let bearer_val = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| StoreError::Config("Invalid api key format".into()))?;
        headers.insert("apikey", key_val);
        headers.insert(AUTHORIZATION, bearer_val);

        // Ensure a TLS crypto provider is installed (reqwest uses rustls-no-provider).
        // The `Err` case just means it was already installed — safe to ignore.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            table: config.table.clone(),
        })
    }

    /// Build the REST URL for the credentials table.
    pub(crate) fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Check HTTP response status, returning error for non-success codes.
    fn check_status(resp: &reqwest::Response) -> Result<(), StoreError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").into(),
            });
        }
        Ok(())
    }

    /// Fetch every row of the table, in the store's natural order.
    pub async fn fetch_all(&self) -> Result<Vec<WifiCredential>, StoreError> {
        let url = format!("{}?select=*", self.table_url());
        let resp = self.http.get(&url).send().await?;
        Self::check_status(&resp)?;
        Ok(resp.json().await?)
    }

    /// Insert one row and return it as created, with its assigned id.
    ///
    /// The payload carries every field the caller holds, empty strings
    /// included; PostgREST expects a one-element array.
    pub async fn insert(&self, record: &NewWifiCredential) -> Result<WifiCredential, StoreError> {
        let resp = self
            .http
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await?;
        Self::check_status(&resp)?;
        let mut rows: Vec<WifiCredential> = resp.json().await?;
        rows.pop().ok_or(StoreError::EmptyReply)
    }
}
