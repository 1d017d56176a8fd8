//! Entries and namespace maps guarded by the store lock.

use std::collections::HashMap;
use std::time::Instant;

use crate::types::VerificationConfig;

/// A saved options payload and the instant it stops being visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct OptionEntry {
    pub payload: String,
    pub expires_at: Instant,
}

impl OptionEntry {
    /// Expired at or past `expires_at`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub(super) struct Namespaces {
    pub configs: HashMap<String, VerificationConfig>,
    pub options: HashMap<String, OptionEntry>,
}

impl Namespaces {
    /// Looks up a live options payload without touching expired entries.
    pub fn live_option(&self, key: &str, now: Instant) -> Option<String> {
        self.options
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.payload.clone())
    }

    pub fn has_expired_options(&self, now: Instant) -> bool {
        self.options.values().any(|entry| entry.is_expired(now))
    }

    /// Drops every options entry expired at `now`. Returns how many were removed.
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.options.len();
        self.options.retain(|_, entry| !entry.is_expired(now));
        before - self.options.len()
    }
}
