//! Application state for the interaction loop.

mod state;

pub use state::{App, AppMode, COPY_MARK_TTL, DraftCredential, FormField, StoreEvent};
