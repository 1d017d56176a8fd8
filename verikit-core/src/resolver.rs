//! Read path merging the options and configs namespaces.

use crate::error::{StoreError, StoreResult};
use crate::store::{ConfigStorage, OptionStorage};
use crate::types::{DisclosureConfig, DisclosureSource, ResolvedDisclosure};

/// Resolves the disclosure options for `id`.
///
/// A live options entry wins. Otherwise a view is derived from the
/// verification config stored under the same id, carrying only minimum age,
/// OFAC flag and excluded countries.
///
/// # Errors
///
/// - [`StoreError::MalformedPayload`] if an options entry exists but is not a
///   valid [`DisclosureConfig`]. The config namespace is not consulted.
/// - [`StoreError::NotFound`] if neither namespace holds `id`.
/// - [`StoreError::StorageFailure`] from either namespace.
pub fn resolve<S>(storage: &S, id: &str) -> StoreResult<ResolvedDisclosure>
where
    S: OptionStorage + ConfigStorage,
{
    match storage.get(id) {
        Ok(payload) => {
            let config = serde_json::from_str::<DisclosureConfig>(&payload).map_err(|e| {
                StoreError::MalformedPayload(format!("invalid disclosure options for {id}: {e}"))
            })?;
            return Ok(ResolvedDisclosure {
                config,
                source: DisclosureSource::Options,
            });
        }
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err),
    }

    storage
        .get_config(id)?
        .map(|config| ResolvedDisclosure {
            config: DisclosureConfig::from(config),
            source: DisclosureSource::Config,
        })
        .ok_or_else(|| StoreError::not_found(id))
}
