//! In-memory configuration store

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{ConfigError, ConfigResult};
use crate::types::RawProviderConfig;
use super::traits::ConfigStore;

/// In-memory configuration store
///
/// All instances live behind a single lock and are replaced wholesale, so a
/// reader observes either the previous or the new configuration of an
/// instance, never a mix of both.
///
/// # Example
///
/// ```
/// use idpconf_core::store::{ConfigStore, MemoryConfigStore};
/// use idpconf_core::RawProviderConfig;
///
/// let store = MemoryConfigStore::new();
/// store.put("corp-sso", RawProviderConfig::for_type("oidc")).unwrap();
/// assert!(store.contains("corp-sso"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    instances: RwLock<HashMap<String, RawProviderConfig>>,
}

impl MemoryConfigStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory store with initial instances
    pub fn with_instances(instances: HashMap<String, RawProviderConfig>) -> Self {
        Self {
            instances: RwLock::new(instances),
        }
    }

    /// Remove all instances
    pub fn clear(&self) {
        self.instances.write().clear();
    }

    /// Number of stored instances
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigStore for MemoryConfigStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, instance_id: &str) -> ConfigResult<RawProviderConfig> {
        self.instances
            .read()
            .get(instance_id)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(instance_id.to_string()))
    }

    fn put(&self, instance_id: &str, config: RawProviderConfig) -> ConfigResult<()> {
        self.instances.write().insert(instance_id.to_string(), config);
        Ok(())
    }

    fn delete(&self, instance_id: &str) -> ConfigResult<()> {
        match self.instances.write().remove(instance_id) {
            Some(_) => Ok(()),
            None => Err(ConfigError::NotFound(instance_id.to_string())),
        }
    }

    fn list_instances(&self) -> ConfigResult<Vec<String>> {
        let mut ids: Vec<String> = self.instances.read().keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn contains(&self, instance_id: &str) -> bool {
        self.instances.read().contains_key(instance_id)
    }
}
