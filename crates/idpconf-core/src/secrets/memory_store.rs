//! In-memory secret store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Secrets held in process memory
///
/// Used by tests and by brokers that load credentials from their own
/// source at startup.
///
/// ```
/// use idpconf_core::secrets::{SecretStore, MemorySecretStore};
///
/// let secrets = MemorySecretStore::new();
/// secrets.store("corp_client_secret", "s3cret").unwrap();
/// assert_eq!(secrets.source_of("corp_client_secret"), Some("memory"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secrets(initial: HashMap<String, String>) -> Self {
        Self {
            secrets: RwLock::new(initial),
        }
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.read().is_empty()
    }

    /// Infallible insert
    pub fn store_sync(&self, name: &str, value: &str) {
        self.secrets.write().insert(name.to_string(), value.to_string());
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, name: &str) -> Option<String> {
        self.secrets.read().get(name).cloned()
    }

    fn store(&self, name: &str, value: &str) -> SecretStoreResult<()> {
        self.store_sync(name, value);
        Ok(())
    }

    fn delete(&self, name: &str) -> SecretStoreResult<()> {
        self.secrets
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| SecretStoreError::NotFound(name.to_string()))
    }
}
