#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! In-memory store for identity verification configs and short-lived,
//! per-user disclosure options.
//!
//! The store keeps two namespaces:
//!
//! - **configs**: long-lived [`VerificationConfig`] values registered under a
//!   config id, replaced wholesale on write, never expiring.
//! - **options**: opaque disclosure-options payloads saved under a user
//!   identifier with a TTL (30 minutes by default).
//!
//! Reads go through [`resolver::resolve`], which returns the live options for
//! an identifier when there are any and otherwise derives a
//! [`DisclosureConfig`] from the config stored under the same id.
//!
//! ```rust
//! use verikit_core::{DisclosureStore, VerificationConfig};
//!
//! # fn main() -> Result<(), verikit_core::StoreError> {
//! let store = DisclosureStore::new();
//! store.upsert_config(
//!     "cfg-a",
//!     VerificationConfig {
//!         minimum_age: 21,
//!         ofac: true,
//!         excluded_countries: vec!["IRN".to_string()],
//!     },
//! )?;
//! store.set_options("user-1", r#"{"minimumAge":18,"name":true}"#)?;
//!
//! assert_eq!(store.resolve("cfg-a")?.minimum_age, Some(21));
//! assert_eq!(store.resolve("user-1")?.name, Some(true));
//! store.close()?;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

pub mod config;
pub use config::{StoreConfig, DEFAULT_OPTIONS_TTL};

mod error;
pub use error::*;

/// Logging bridge forwarding the store's `log` records to a host logger.
pub mod logger;

pub mod resolver;

pub mod store;
pub use store::{ConfigStorage, DisclosureStore, OptionStorage};

mod types;
pub use types::*;
