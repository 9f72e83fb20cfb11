//! Raw provider configuration and provider type identifiers

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw key holding the provider type of an instance
pub const PROVIDER_TYPE_KEY: &str = "providerType";

/// Identifier of a provider implementation ("oidc", "saml", "custom-oidc", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderTypeId(String);

impl ProviderTypeId {
    /// Create a provider type id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderTypeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProviderTypeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProviderTypeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Raw string configuration of one provider instance
///
/// Keys are case-sensitive and unique. Values are stored verbatim; parsing
/// into typed values happens in the configuration views.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProviderConfig {
    entries: HashMap<String, String>,
}

impl RawProviderConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for the given provider type
    pub fn for_type(provider_type: impl Into<String>) -> Self {
        Self::new().with(PROVIDER_TYPE_KEY, provider_type)
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Get the stored value for a key, blank or not
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get the stored value for a key, treating blank values as absent
    pub fn get_non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The provider type recorded in this configuration, if any
    ///
    /// The stored text is used as is; only a blank value counts as absent.
    pub fn provider_type(&self) -> Option<ProviderTypeId> {
        self.get_non_blank(PROVIDER_TYPE_KEY).map(ProviderTypeId::new)
    }

    /// Stored keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a key holds a credential that must never be printed
pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    lower.contains("secret") || lower.contains("password")
}

impl fmt::Debug for RawProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in self.keys() {
            if is_sensitive_key(key) {
                map.entry(&key, &"***");
            } else {
                map.entry(&key, &self.entries[key]);
            }
        }
        map.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for RawProviderConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for RawProviderConfig {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_lookup() {
        let raw = RawProviderConfig::for_type("custom-oidc");
        assert_eq!(raw.provider_type(), Some(ProviderTypeId::from("custom-oidc")));

        let blank = RawProviderConfig::new().with(PROVIDER_TYPE_KEY, "  ");
        assert_eq!(blank.provider_type(), None);
        assert_eq!(RawProviderConfig::new().provider_type(), None);

        let padded = RawProviderConfig::for_type(" oidc ");
        assert_eq!(padded.provider_type(), Some(ProviderTypeId::from(" oidc ")));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let raw = RawProviderConfig::new()
            .with("clientId", "a")
            .with("ClientId", "b");
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.get("clientId"), Some("a"));
        assert_eq!(raw.get("ClientId"), Some("b"));
        assert_eq!(raw.get("CLIENTID"), None);
    }

    #[test]
    fn test_blank_values_are_absent_for_non_blank_lookup() {
        let raw = RawProviderConfig::new().with("dummyConfig", "");
        assert_eq!(raw.get("dummyConfig"), Some(""));
        assert_eq!(raw.get_non_blank("dummyConfig"), None);
    }

    #[test]
    fn test_debug_masks_secrets() {
        let raw = RawProviderConfig::for_type("oidc")
            .with("clientId", "broker")
            .with("clientSecret", "s3cr3t-value")
            .with("bindPassword", "hunter2");
        let printed = format!("{:?}", raw);
        assert!(printed.contains("broker"));
        assert!(!printed.contains("s3cr3t-value"));
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn test_serde_transparent_shape() {
        let raw = RawProviderConfig::for_type("saml").with("forceAuthn", "true");
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["providerType"], "saml");
        assert_eq!(json["forceAuthn"], "true");

        let back: RawProviderConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, raw);
    }
}
