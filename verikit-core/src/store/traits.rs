//! Storage interfaces the resolver reads through.
//!
//! [`crate::DisclosureStore`] implements both traits in memory. A durable
//! backend (Redis, a KV service) implements the same pair and plugs into
//! [`crate::resolver::resolve`] unchanged.

use std::time::Duration;

use crate::error::StoreResult;
use crate::types::VerificationConfig;

/// Short-lived options namespace with per-entry expiry.
pub trait OptionStorage: Send + Sync {
    /// Stores `payload` under `key`, expiring `ttl` from now.
    ///
    /// Replaces any existing payload and expiry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::StorageFailure`] if the write cannot be
    /// completed.
    fn set_with_expiration(&self, key: &str, payload: String, ttl: Duration) -> StoreResult<()>;

    /// Returns the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::NotFound`] if `key` is absent or expired,
    /// or [`crate::StoreError::StorageFailure`] if the read fails.
    fn get(&self, key: &str) -> StoreResult<String>;
}

/// Long-lived verification config namespace.
pub trait ConfigStorage: Send + Sync {
    /// Maps a user identifier and user-defined data to the id configs are
    /// stored under.
    fn action_id(&self, user_identifier: &str, user_defined_data: &str) -> String;

    /// Inserts or replaces the config stored under `id`.
    ///
    /// Returns `true` if a config already existed under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::StorageFailure`] if the write cannot be
    /// completed.
    fn upsert_config(&self, id: &str, config: VerificationConfig) -> StoreResult<bool>;

    /// Returns the config stored under `id`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::StorageFailure`] if the read fails.
    fn get_config(&self, id: &str) -> StoreResult<Option<VerificationConfig>>;
}
