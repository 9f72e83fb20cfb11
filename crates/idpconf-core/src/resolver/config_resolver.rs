//! Resolution of provider instances into typed configuration views
//!
//! Resolution never caches: every call reads the current configuration from
//! the store and builds a fresh view, so an administrator's change is
//! visible on the very next call.

use std::sync::Arc;

use crate::error::{ConfigError, ConfigResult};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::registry::ProviderTypeRegistry;
use crate::store::ConfigStore;
use crate::view::ProviderConfigView;
use crate::{log_debug, log_warn};

/// Resolves provider instance ids into configuration views
///
/// Cheap to clone and safe to share between threads; it holds no state of
/// its own beyond the store, the registry and the logger.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use idpconf_core::{ConfigResolver, MemoryConfigStore, ProviderTypeRegistry, RawProviderConfig};
/// use idpconf_core::store::ConfigStore;
/// use idpconf_core::view::CustomOidcProviderConfig;
///
/// let mut registry = ProviderTypeRegistry::with_builtin_types();
/// CustomOidcProviderConfig::register(&mut registry).unwrap();
///
/// let store = Arc::new(MemoryConfigStore::new());
/// store.put("partner", RawProviderConfig::for_type("custom-oidc").with("dummyConfig", "hello")).unwrap();
///
/// let resolver = ConfigResolver::new(store, Arc::new(registry));
/// let view = resolver.resolve_as::<CustomOidcProviderConfig>("partner").unwrap();
/// assert_eq!(view.dummy_config().unwrap(), "hello");
/// ```
#[derive(Clone)]
pub struct ConfigResolver {
    store: Arc<dyn ConfigStore>,
    registry: Arc<ProviderTypeRegistry>,
    logger: SharedLogger,
}

impl ConfigResolver {
    /// Create a resolver that logs nothing
    pub fn new(store: Arc<dyn ConfigStore>, registry: Arc<ProviderTypeRegistry>) -> Self {
        Self {
            store,
            registry,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Replace the logger
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn store(&self) -> &Arc<dyn ConfigStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<ProviderTypeRegistry> {
        &self.registry
    }

    /// Resolve an instance into a view of its provider type
    ///
    /// Fails with `NotFound` for unknown instances, `MissingProviderType`
    /// when the configuration names no provider type and
    /// `UnknownProviderType` when no factory is registered for it.
    /// Required settings are not checked here; see `resolve_validated`.
    pub fn resolve(&self, instance_id: &str) -> ConfigResult<Box<dyn ProviderConfigView>> {
        log_debug!(self.logger, "Resolving provider instance {}", instance_id);

        let result = self.build_view(instance_id);
        if let Err(e) = &result {
            log_warn!(self.logger, "Failed to resolve provider instance {}: {}", instance_id, e);
        }
        result
    }

    fn build_view(&self, instance_id: &str) -> ConfigResult<Box<dyn ProviderConfigView>> {
        let raw = self.store.get(instance_id)?;
        let provider_type = raw
            .provider_type()
            .ok_or_else(|| ConfigError::MissingProviderType(instance_id.to_string()))?;
        let descriptor = self.registry.resolve(provider_type.as_str())?;

        log_debug!(
            self.logger,
            "Provider instance {} is of type {}",
            instance_id,
            descriptor.provider_type
        );
        Ok(descriptor.build(raw))
    }

    /// Resolve an instance into a concrete view type
    ///
    /// Fails with `ViewTypeMismatch` when the instance's provider type
    /// builds a different kind of view.
    pub fn resolve_as<V: ProviderConfigView>(&self, instance_id: &str) -> ConfigResult<V> {
        let view = self.resolve(instance_id)?;
        let provider_type = view.provider_type().to_string();
        view.into_any()
            .downcast::<V>()
            .map(|view| *view)
            .map_err(|_| ConfigError::ViewTypeMismatch {
                provider_type,
                expected: std::any::type_name::<V>(),
            })
    }

    /// Resolve an instance and check every declared setting
    pub fn resolve_validated(&self, instance_id: &str) -> ConfigResult<Box<dyn ProviderConfigView>> {
        let view = self.resolve(instance_id)?;
        if let Err(e) = view.validate() {
            log_warn!(self.logger, "Provider instance {} is misconfigured: {}", instance_id, e);
            return Err(e);
        }
        Ok(view)
    }
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("store", &self.store.name())
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger};
    use crate::store::MemoryConfigStore;
    use crate::types::RawProviderConfig;
    use crate::view::{CustomOidcProviderConfig, OidcProviderConfig, SamlProviderConfig};

    fn resolver_with(store: Arc<MemoryConfigStore>) -> ConfigResolver {
        let mut registry = ProviderTypeRegistry::with_builtin_types();
        CustomOidcProviderConfig::register(&mut registry).unwrap();
        ConfigResolver::new(store, Arc::new(registry))
    }

    #[test]
    fn test_missing_provider_type() {
        let store = Arc::new(MemoryConfigStore::new());
        store.put("p1", RawProviderConfig::new().with("clientId", "x")).unwrap();
        store.put("p2", RawProviderConfig::for_type("")).unwrap();

        let resolver = resolver_with(store);
        assert!(matches!(resolver.resolve("p1"), Err(ConfigError::MissingProviderType(id)) if id == "p1"));
        assert!(matches!(resolver.resolve("p2"), Err(ConfigError::MissingProviderType(_))));
    }

    #[test]
    fn test_unknown_type_never_falls_back() {
        let store = Arc::new(MemoryConfigStore::new());
        store.put("p1", RawProviderConfig::for_type("OIDC")).unwrap();
        store.put("p2", RawProviderConfig::for_type(" oidc ")).unwrap();

        let resolver = resolver_with(store);
        assert!(matches!(
            resolver.resolve("p1"),
            Err(ConfigError::UnknownProviderType(t)) if t == "OIDC"
        ));
        assert!(matches!(
            resolver.resolve("p2"),
            Err(ConfigError::UnknownProviderType(t)) if t == " oidc "
        ));
    }

    #[test]
    fn test_resolve_as() {
        let store = Arc::new(MemoryConfigStore::new());
        store.put("corp", RawProviderConfig::for_type("oidc").with("clientId", "broker")).unwrap();
        store.put("saml-idp", RawProviderConfig::for_type("saml")).unwrap();

        let resolver = resolver_with(store);
        let oidc = resolver.resolve_as::<OidcProviderConfig>("corp").unwrap();
        assert_eq!(oidc.client_id().unwrap(), "broker");

        assert!(resolver.resolve_as::<SamlProviderConfig>("saml-idp").is_ok());
        match resolver.resolve_as::<OidcProviderConfig>("saml-idp") {
            Err(ConfigError::ViewTypeMismatch { provider_type, expected }) => {
                assert_eq!(provider_type, "saml");
                assert!(expected.contains("OidcProviderConfig"));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_resolve_validated() {
        let store = Arc::new(MemoryConfigStore::new());
        store
            .put(
                "complete",
                RawProviderConfig::for_type("saml")
                    .with("singleSignOnServiceUrl", "https://idp.example.com/sso"),
            )
            .unwrap();
        store.put("incomplete", RawProviderConfig::for_type("saml")).unwrap();

        let resolver = resolver_with(store);
        assert!(resolver.resolve_validated("complete").is_ok());

        // Plain resolution succeeds; the missing setting only shows up on validation
        assert!(resolver.resolve("incomplete").is_ok());
        assert!(matches!(
            resolver.resolve_validated("incomplete"),
            Err(ConfigError::MissingRequiredConfig { key }) if key == "singleSignOnServiceUrl"
        ));
    }

    #[test]
    fn test_failures_are_logged_and_returned() {
        let store = Arc::new(MemoryConfigStore::new());
        let logger = Arc::new(MemoryLogger::new());
        let resolver = resolver_with(store).with_logger(logger.clone());

        assert!(matches!(resolver.resolve("ghost"), Err(ConfigError::NotFound(_))));

        let warnings = logger.messages(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("ghost"));
        assert!(!logger.messages(LogLevel::Debug).is_empty());
    }

    #[test]
    fn test_resolver_shared_across_threads() {
        let store = Arc::new(MemoryConfigStore::new());
        store
            .put("p1", RawProviderConfig::for_type("custom-oidc").with("dummyConfig", "hello"))
            .unwrap();
        let resolver = resolver_with(store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = resolver.clone();
                std::thread::spawn(move || {
                    let view = resolver.resolve_as::<CustomOidcProviderConfig>("p1").unwrap();
                    view.dummy_config().unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "hello");
        }
    }
}
