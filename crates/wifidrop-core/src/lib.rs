//! `WifiDrop` Core Library
//!
//! Shared functionality for `WifiDrop` components:
//! - WiFi credential record model and network-name search filter
//! - Configuration resolution and hierarchy
//! - Common error types

pub mod config;
pub mod error;
pub mod record;
pub mod tracing_init;

pub use config::Config;
pub use error::{Error, Result};
pub use record::{NewWifiCredential, WifiCredential};
