//! Process-wide provider type registry
//!
//! Brokers that prefer a single registry for the whole process fill one
//! during startup and install it once. There is no way to modify or replace
//! it afterwards.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{ConfigError, ConfigResult};
use super::type_registry::ProviderTypeRegistry;

static GLOBAL_REGISTRY: OnceCell<Arc<ProviderTypeRegistry>> = OnceCell::new();

/// Install the process-wide registry
///
/// Returns `Err(ConfigError::RegistryAlreadyInstalled)` on every call after the first.
pub fn install_global(registry: ProviderTypeRegistry) -> ConfigResult<Arc<ProviderTypeRegistry>> {
    let registry = Arc::new(registry);
    GLOBAL_REGISTRY
        .set(Arc::clone(&registry))
        .map_err(|_| ConfigError::RegistryAlreadyInstalled)?;
    Ok(registry)
}

/// The process-wide registry, if one has been installed
pub fn global() -> Option<Arc<ProviderTypeRegistry>> {
    GLOBAL_REGISTRY.get().cloned()
}
