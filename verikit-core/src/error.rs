use thiserror::Error;

/// Result type for store and resolver operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error outputs from the disclosure store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key is absent, or its options entry has expired.
    #[error("not_found: {key}")]
    NotFound {
        /// Key that was looked up.
        key: String,
    },
    /// A payload exists but does not deserialize into the expected shape.
    #[error("malformed_payload: {0}")]
    MalformedPayload(String),
    /// The backing storage could not complete the operation.
    #[error("storage_failure: {0}")]
    StorageFailure(String),
}

impl StoreError {
    pub(crate) fn not_found(key: &str) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }

    /// Returns `true` for the expected "nothing stored here" outcome.
    ///
    /// Callers use this to tell "not configured" apart from corruption or
    /// environment faults.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised while loading a [`crate::StoreConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but its value cannot be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value found in the environment.
        value: String,
    },
    /// The JSON document is not a valid store configuration.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}
