//! Verification policy and disclosure types held or produced by the store.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Long-lived verification policy registered under a config id.
///
/// Stored as-is; the store does not validate its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationConfig {
    /// Minimum age the holder must prove.
    pub minimum_age: i32,
    /// Whether the holder must pass the OFAC sanctions-list check.
    pub ofac: bool,
    /// ISO 3166-1 alpha-3 codes of issuing countries that are rejected.
    pub excluded_countries: Vec<String>,
}

/// Disclosure options a verification flow requests or enforces.
///
/// Every field is optional. When derived from a [`VerificationConfig`] only
/// the policy fields are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureConfig {
    /// Minimum age the holder must prove.
    #[serde(rename = "minimumAge", skip_serializing_if = "Option::is_none")]
    pub minimum_age: Option<i32>,
    /// Whether the OFAC sanctions-list check is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofac: Option<bool>,
    /// Issuing countries that are rejected.
    #[serde(rename = "excludedCountries", skip_serializing_if = "Option::is_none")]
    pub excluded_countries: Option<Vec<String>>,
    /// Disclose the document's issuing state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_state: Option<bool>,
    /// Disclose the holder's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<bool>,
    /// Disclose the holder's nationality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<bool>,
    /// Disclose the holder's date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<bool>,
    /// Disclose the document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<bool>,
    /// Disclose the holder's gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<bool>,
    /// Disclose the document's expiry date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<bool>,
}

impl From<VerificationConfig> for DisclosureConfig {
    fn from(config: VerificationConfig) -> Self {
        Self {
            minimum_age: Some(config.minimum_age),
            ofac: Some(config.ofac),
            excluded_countries: Some(config.excluded_countries),
            ..Self::default()
        }
    }
}

/// Namespace that answered a resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DisclosureSource {
    /// Short-lived per-user options saved with a TTL.
    Options,
    /// Derived from a long-lived verification config.
    Config,
}

/// A resolved [`DisclosureConfig`] tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDisclosure {
    /// The disclosure view.
    pub config: DisclosureConfig,
    /// Which namespace produced it.
    pub source: DisclosureSource,
}
