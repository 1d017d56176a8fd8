//! In-memory store for verification configs and disclosure options.
//!
//! Two namespaces sit behind one [`RwLock`]:
//!
//! - **configs**: [`VerificationConfig`] values keyed by config id. No expiry;
//!   writes upsert.
//! - **options**: opaque payloads keyed by user identifier, each with an
//!   absolute expiry. An entry is invisible once the clock reaches its expiry.
//!   Reads that come across expired entries remove them under the write lock.

mod entry;
pub mod traits;

use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::resolver;
use crate::types::{DisclosureConfig, ResolvedDisclosure, VerificationConfig};

use entry::{Namespaces, OptionEntry};
pub use traits::{ConfigStorage, OptionStorage};

/// Concurrent store holding verification configs and expiring disclosure options.
///
/// Every read returns an owned copy. Instances are independent; use
/// [`DisclosureStore::shared`] for the process-wide default.
pub struct DisclosureStore {
    inner: RwLock<Namespaces>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
}

impl std::fmt::Debug for DisclosureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisclosureStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for DisclosureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DisclosureStore {
    /// Creates an empty store with the default configuration and system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with `config` and the system clock.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            inner: RwLock::new(Namespaces::default()),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replaces the time source used for expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the process-wide store, creating it on first use.
    ///
    /// The first call reads its configuration with [`StoreConfig::from_env`];
    /// invalid values are logged and replaced by the defaults.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<DisclosureStore>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::with_config(Self::env_config()))))
    }

    fn env_config() -> StoreConfig {
        StoreConfig::from_env().unwrap_or_else(|err| {
            log::warn!("falling back to default store config: {err}");
            StoreConfig::default()
        })
    }

    /// Returns the configuration this store was built with.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Namespaces>> {
        self.inner
            .read()
            .map_err(|_| StoreError::StorageFailure("store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Namespaces>> {
        self.inner
            .write()
            .map_err(|_| StoreError::StorageFailure("store lock poisoned".to_string()))
    }

    /// Inserts or replaces the verification config stored under `id`.
    ///
    /// Returns `true` if a config already existed under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageFailure`] if the store lock is poisoned.
    pub fn upsert_config(&self, id: &str, config: VerificationConfig) -> StoreResult<bool> {
        let existed = self.write()?.configs.insert(id.to_string(), config).is_some();
        if existed {
            log::debug!("replaced verification config {id}");
        }
        Ok(existed)
    }

    /// Returns a copy of the verification config stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageFailure`] if the store lock is poisoned.
    pub fn get_config(&self, id: &str) -> StoreResult<Option<VerificationConfig>> {
        Ok(self.read()?.configs.get(id).cloned())
    }

    /// Stores `payload` under `key` in the options namespace, visible for `ttl`.
    ///
    /// Overwrites any existing payload and expiry. A zero `ttl` stores an
    /// entry that is already expired.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageFailure`] if `now + ttl` cannot be
    /// represented or the store lock is poisoned.
    pub fn set_with_expiration(
        &self,
        key: &str,
        payload: impl Into<String>,
        ttl: Duration,
    ) -> StoreResult<()> {
        let expires_at = self.expiry_from_now(ttl)?;
        let entry = OptionEntry {
            payload: payload.into(),
            expires_at,
        };
        self.write()?.options.insert(key.to_string(), entry);
        Ok(())
    }

    /// Stores `payload` under `key` with the configured options TTL.
    ///
    /// # Errors
    ///
    /// See [`DisclosureStore::set_with_expiration`].
    pub fn set_options(&self, key: &str, payload: impl Into<String>) -> StoreResult<()> {
        self.set_with_expiration(key, payload, self.config.options_ttl)
    }

    /// Returns a copy of the live options payload stored under `key`.
    ///
    /// If the shared read sees any expired entry, the lock is re-taken
    /// exclusively and every expired entry is removed before answering.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `key` is absent or expired, or
    /// [`StoreError::StorageFailure`] if the store lock is poisoned.
    pub fn get(&self, key: &str) -> StoreResult<String> {
        let now = self.clock.now();

        let payload = {
            let guard = self.read()?;
            if self.config.sweep_on_read && guard.has_expired_options(now) {
                drop(guard);
                let mut guard = self.write()?;
                let removed = guard.prune_expired(now);
                if removed > 0 {
                    log::debug!("swept {removed} expired options entries");
                }
                guard.live_option(key, now)
            } else {
                guard.live_option(key, now)
            }
        };

        payload.ok_or_else(|| {
            log::trace!("options miss for {key}");
            StoreError::not_found(key)
        })
    }

    /// Removes every expired options entry. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageFailure`] if the store lock is poisoned.
    pub fn purge_expired(&self) -> StoreResult<usize> {
        let now = self.clock.now();
        let removed = self.write()?.prune_expired(now);
        if removed > 0 {
            log::debug!("purged {removed} expired options entries");
        }
        Ok(removed)
    }

    /// Deletes the options entry under `key`. Returns `true` if one was present,
    /// expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageFailure`] if the store lock is poisoned.
    pub fn remove_options(&self, key: &str) -> StoreResult<bool> {
        Ok(self.write()?.options.remove(key).is_some())
    }

    /// Number of options entries held, including expired ones not yet swept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageFailure`] if the store lock is poisoned.
    pub fn options_len(&self) -> StoreResult<usize> {
        Ok(self.read()?.options.len())
    }

    /// Number of verification configs held.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageFailure`] if the store lock is poisoned.
    pub fn configs_len(&self) -> StoreResult<usize> {
        Ok(self.read()?.configs.len())
    }

    /// Resolves the disclosure options for `id`, preferring live options over
    /// a config-derived view.
    ///
    /// # Errors
    ///
    /// See [`resolver::resolve`].
    pub fn resolve(&self, id: &str) -> StoreResult<DisclosureConfig> {
        resolver::resolve(self, id).map(|resolved| resolved.config)
    }

    /// Like [`DisclosureStore::resolve`], but also reports which namespace
    /// answered.
    ///
    /// # Errors
    ///
    /// See [`resolver::resolve`].
    pub fn resolve_with_source(&self, id: &str) -> StoreResult<ResolvedDisclosure> {
        resolver::resolve(self, id)
    }

    /// Releases resources held by the store.
    ///
    /// Nothing is held in memory-only mode, so this only marks the teardown
    /// point. The store remains usable and `close` may be called repeatedly.
    ///
    /// # Errors
    ///
    /// Never fails for the in-memory store.
    pub fn close(&self) -> StoreResult<()> {
        log::trace!("disclosure store closed");
        Ok(())
    }

    fn expiry_from_now(&self, ttl: Duration) -> StoreResult<Instant> {
        self.clock.now().checked_add(ttl).ok_or_else(|| {
            StoreError::StorageFailure(format!("expiry out of range for ttl {ttl:?}"))
        })
    }
}

impl OptionStorage for DisclosureStore {
    fn set_with_expiration(&self, key: &str, payload: String, ttl: Duration) -> StoreResult<()> {
        Self::set_with_expiration(self, key, payload, ttl)
    }

    fn get(&self, key: &str) -> StoreResult<String> {
        Self::get(self, key)
    }
}

impl ConfigStorage for DisclosureStore {
    fn action_id(&self, user_identifier: &str, _user_defined_data: &str) -> String {
        user_identifier.to_string()
    }

    fn upsert_config(&self, id: &str, config: VerificationConfig) -> StoreResult<bool> {
        Self::upsert_config(self, id, config)
    }

    fn get_config(&self, id: &str) -> StoreResult<Option<VerificationConfig>> {
        Self::get_config(self, id)
    }
}
