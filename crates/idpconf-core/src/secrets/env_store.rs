//! Environment variable secret store

use std::env;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Prefix of environment variables holding vault secrets
pub const ENV_PREFIX: &str = "IDP_VAULT_";

/// Secret store that reads from environment variables
///
/// Read-only. A secret named `corp_client-secret` is looked up first as the
/// variable `IDP_VAULT_CORP_CLIENT_SECRET`, then under its literal name.
///
/// # Example
///
/// ```
/// use idpconf_core::secrets::EnvSecretStore;
///
/// assert_eq!(EnvSecretStore::env_var_name("corp.client-secret"), "IDP_VAULT_CORP_CLIENT_SECRET");
/// ```
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    /// Create a new environment variable secret store
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// The prefixed environment variable a secret name maps to
    pub fn env_var_name(name: &str) -> String {
        let normalized: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}{}", ENV_PREFIX, normalized)
    }

    fn read_var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.is_empty())
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, name: &str) -> Option<String> {
        Self::read_var(&Self::env_var_name(name)).or_else(|| Self::read_var(name))
    }

    fn store(&self, _name: &str, _value: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::read_only(self.name()))
    }

    fn delete(&self, _name: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::read_only(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_store_read_only() {
        let store = EnvSecretStore::new();
        assert_eq!(store.name(), "env");
        assert!(matches!(store.store("test", "value"), Err(SecretStoreError::ReadOnly { .. })));
        assert!(matches!(store.delete("test"), Err(SecretStoreError::ReadOnly { .. })));
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(EnvSecretStore::env_var_name("partner_secret"), "IDP_VAULT_PARTNER_SECRET");
        assert_eq!(EnvSecretStore::env_var_name("a.b-c"), "IDP_VAULT_A_B_C");
    }

    #[test]
    fn test_env_store_get_prefixed() {
        env::set_var("IDP_VAULT_TEST_PREFIXED_12345", "prefixed_value");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("test_prefixed_12345"), Some("prefixed_value".to_string()));

        env::remove_var("IDP_VAULT_TEST_PREFIXED_12345");
    }

    #[test]
    fn test_env_store_get_direct() {
        env::set_var("TEST_DIRECT_SECRET_12345", "direct_value");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("TEST_DIRECT_SECRET_12345"), Some("direct_value".to_string()));

        env::remove_var("TEST_DIRECT_SECRET_12345");
    }

    #[test]
    fn test_env_store_get_not_found() {
        let store = EnvSecretStore::new();
        assert_eq!(store.get("nonexistent_secret_xyz"), None);
        assert_eq!(store.source_of("nonexistent_secret_xyz"), None);
    }
}
