//! Headless (non-interactive) mode.
//!
//! `wifidrop list` prints every shared network to stdout; `wifidrop add`
//! performs one insert and reports the assigned id. Both reuse the same
//! store gateway as the TUI.

use anyhow::Context;
use tracing::info;

use wifidrop_core::NewWifiCredential;

use crate::store::StoreClient;

/// Print every record in store order, one card per network.
pub async fn list(store: &StoreClient) -> anyhow::Result<()> {
    let records = store.fetch_all().await.context("fetching networks")?;
    info!(count = records.len(), "Fetched networks");

    if records.is_empty() {
        println!("No networks shared yet.");
        return Ok(());
    }
    for wifi in &records {
        if let Some(business) = wifi.business_name.as_deref() {
            println!("{business}");
        }
        println!("  network  - {}", wifi.network_name);
        println!("  password - {}", wifi.password);
        if let (Some(city), Some(state)) = (&wifi.city, &wifi.state) {
            println!("  {city}, {state}");
        }
        println!();
    }
    Ok(())
}

/// Insert one record and report the assigned id.
pub async fn add(store: &StoreClient, record: NewWifiCredential) -> anyhow::Result<()> {
    let created = store.insert(&record).await.context("adding network")?;
    info!(id = created.id, "Shared network");
    println!("Added {} (id {})", created.network_name, created.id);
    Ok(())
}
