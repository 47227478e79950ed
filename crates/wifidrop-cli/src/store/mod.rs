//! Record store gateway.
//!
//! Thin pass-through to the remote managed table: fetch-all and insert-one,
//! no caching, no retries, no interpretation of failure causes.

mod client;

pub use client::{StoreClient, StoreConfig, StoreError};
