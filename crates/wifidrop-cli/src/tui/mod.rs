//! TUI input handling and background work dispatch.
//!
//! The interaction loop stays single-threaded: store calls and the
//! copy-marker timer run as spawned tasks that report completions back over
//! an mpsc channel as [`StoreEvent`]s. `App` is only ever touched by the
//! loop, so the state layer needs no locking.

pub mod input;

use std::sync::Arc;

use tokio::sync::mpsc;

use wifidrop_core::NewWifiCredential;

use crate::app::{COPY_MARK_TTL, StoreEvent};
use crate::store::StoreClient;

/// Spawns store calls and timers, reporting completions over the channel.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<StoreClient>,
    events: mpsc::Sender<StoreEvent>,
}

impl Dispatcher {
    pub fn new(store: Arc<StoreClient>, events: mpsc::Sender<StoreEvent>) -> Self {
        Self { store, events }
    }

    /// Fire the select-all. Completion replaces the in-memory list.
    pub fn spawn_fetch_all(&self) {
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = store.fetch_all().await;
            let _ = events.send(StoreEvent::Loaded(result)).await;
        });
    }

    /// Fire one insert. Rapid submissions may overlap; no guard exists.
    pub fn spawn_insert(&self, record: NewWifiCredential) {
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = store.insert(&record).await;
            let _ = events.send(StoreEvent::Inserted(result)).await;
        });
    }

    /// Arm the two-second copy-marker expiry for `id`.
    ///
    /// The expiry event carries the id it was armed for; the state layer
    /// ignores it unless the marker still belongs to that id.
    pub fn spawn_copy_expiry(&self, id: i64) {
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(COPY_MARK_TTL).await;
            let _ = events.send(StoreEvent::CopyMarkExpired { id }).await;
        });
    }
}
