//! Chained secret store with fallback behavior

use std::sync::Arc;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// A secret store that chains multiple stores together with fallback behavior
///
/// Reads try each available store in order and return the first match.
/// Writes go to the first store.
///
/// # Example
///
/// ```
/// use idpconf_core::secrets::{SecretStore, ChainSecretStore, EnvSecretStore, MemorySecretStore};
/// use std::sync::Arc;
///
/// let memory: Arc<dyn SecretStore> = Arc::new(MemorySecretStore::new());
/// let env: Arc<dyn SecretStore> = Arc::new(EnvSecretStore::new());
///
/// // Try memory first, then fall back to env
/// let chain = ChainSecretStore::new(vec![memory, env]);
/// chain.store("partner_secret", "value").unwrap();
/// ```
pub struct ChainSecretStore {
    stores: Vec<Arc<dyn SecretStore>>,
}

impl ChainSecretStore {
    /// Create a new chain store; stores are tried in order for reads
    pub fn new(stores: Vec<Arc<dyn SecretStore>>) -> Self {
        Self { stores }
    }

    /// Get the stores in this chain
    pub fn stores(&self) -> &[Arc<dyn SecretStore>] {
        &self.stores
    }

    /// Find which store has a secret
    pub fn find_store(&self, name: &str) -> Option<&Arc<dyn SecretStore>> {
        self.stores
            .iter()
            .find(|store| store.is_available() && store.has(name))
    }
}

impl std::fmt::Debug for ChainSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stores.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainSecretStore").field("stores", &names).finish()
    }
}

impl SecretStore for ChainSecretStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        self.stores.iter().any(|s| s.is_available())
    }

    fn get(&self, name: &str) -> Option<String> {
        self.stores
            .iter()
            .filter(|store| store.is_available())
            .find_map(|store| store.get(name))
    }

    fn store(&self, name: &str, value: &str) -> SecretStoreResult<()> {
        match self.stores.first() {
            Some(store) => store.store(name, value),
            None => Err(SecretStoreError::Other("chain has no stores".to_string())),
        }
    }

    /// Delete from every member holding the secret
    ///
    /// Fails with `NotFound` when no member holds it, and with the first
    /// member error (typically `ReadOnly`) when a member kept its copy.
    fn delete(&self, name: &str) -> SecretStoreResult<()> {
        let mut held = false;
        let mut first_error = None;
        for store in self.stores.iter().filter(|store| store.has(name)) {
            held = true;
            if let Err(e) = store.delete(name) {
                first_error.get_or_insert(e);
            }
        }

        match (held, first_error) {
            (false, _) => Err(SecretStoreError::NotFound(name.to_string())),
            (true, Some(e)) => Err(e),
            (true, None) => Ok(()),
        }
    }

    fn source_of(&self, name: &str) -> Option<&str> {
        self.find_store(name).map(|store| store.name())
    }
}
