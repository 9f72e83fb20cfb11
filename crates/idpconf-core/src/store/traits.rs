//! Configuration store trait

use crate::error::ConfigResult;
use crate::types::RawProviderConfig;

/// Backing store for raw provider instance configuration
///
/// Implementations:
/// - `MemoryConfigStore`: In-process, for tests and embedded brokers
/// - `FileConfigStore`: YAML file (~/.config/idpconf/providers.yaml)
/// - Database or remote config service adapters supplied by the broker
///
/// Stores never interpret keys or values. Every `get` returns an owned
/// snapshot of a complete configuration, and `put` replaces the whole
/// configuration of an instance at once.
pub trait ConfigStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Get the configuration of an instance
    ///
    /// Returns `Err(ConfigError::NotFound)` if nothing is stored for `instance_id`.
    fn get(&self, instance_id: &str) -> ConfigResult<RawProviderConfig>;

    /// Replace the configuration of an instance
    fn put(&self, instance_id: &str, config: RawProviderConfig) -> ConfigResult<()>;

    /// Remove the configuration of an instance
    ///
    /// Returns `Err(ConfigError::NotFound)` if nothing is stored for `instance_id`.
    fn delete(&self, instance_id: &str) -> ConfigResult<()>;

    /// Ids of all stored instances, sorted
    fn list_instances(&self) -> ConfigResult<Vec<String>>;

    /// Check if an instance exists
    fn contains(&self, instance_id: &str) -> bool {
        self.get(instance_id).is_ok()
    }
}
