//! Provider type registry for building configuration views by type id

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{ProviderTypeId, RawProviderConfig};
use crate::view::{OidcProviderConfig, ProviderConfigView, SamlProviderConfig};

/// Factory function type for building configuration views
pub type ViewFactory =
    Arc<dyn Fn(ProviderTypeId, RawProviderConfig) -> Box<dyn ProviderConfigView> + Send + Sync>;

fn build_oidc(provider_type: ProviderTypeId, raw: RawProviderConfig) -> Box<dyn ProviderConfigView> {
    Box::new(OidcProviderConfig::new(provider_type, raw))
}

fn build_saml(provider_type: ProviderTypeId, raw: RawProviderConfig) -> Box<dyn ProviderConfigView> {
    Box::new(SamlProviderConfig::new(provider_type, raw))
}

/// Definition of a registered provider type
#[derive(Clone)]
pub struct ProviderDescriptor {
    /// Unique provider type id
    pub provider_type: ProviderTypeId,
    /// Human-readable description
    pub description: String,
    /// Factory function to build views
    pub factory: ViewFactory,
    /// Whether this type ships with the crate
    pub builtin: bool,
}

impl ProviderDescriptor {
    /// Build a view over `raw` for this provider type
    pub fn build(&self, raw: RawProviderConfig) -> Box<dyn ProviderConfigView> {
        (self.factory)(self.provider_type.clone(), raw)
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("provider_type", &self.provider_type)
            .field("description", &self.description)
            .field("builtin", &self.builtin)
            .finish()
    }
}

/// Registry of provider types
///
/// Registration takes `&mut self`, so types can only be added while the
/// registry is still owned by startup code. Once it is wrapped in an `Arc`
/// and handed to a resolver it is read-only and needs no locking.
///
/// # Example
///
/// ```
/// use idpconf_core::registry::ProviderTypeRegistry;
/// use idpconf_core::view::OidcProviderConfig;
///
/// let mut registry = ProviderTypeRegistry::with_builtin_types();
/// registry
///     .register("partner-oidc", "Partner OIDC", |provider_type, raw| {
///         Box::new(OidcProviderConfig::new(provider_type, raw))
///     })
///     .unwrap();
/// assert!(registry.contains("partner-oidc"));
/// ```
#[derive(Debug, Default)]
pub struct ProviderTypeRegistry {
    descriptors: HashMap<ProviderTypeId, ProviderDescriptor>,
}

impl ProviderTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in provider types
    ///
    /// - `oidc`: OpenID Connect
    /// - `keycloak-oidc`: OpenID Connect against another Keycloak-compatible broker
    /// - `saml`: SAML 2.0
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.insert("oidc", "OpenID Connect v1.0", Arc::new(build_oidc), true);
        registry.insert(
            "keycloak-oidc",
            "OpenID Connect against a Keycloak-compatible broker",
            Arc::new(build_oidc),
            true,
        );
        registry.insert("saml", "SAML v2.0", Arc::new(build_saml), true);
        registry
    }

    /// Register a new provider type
    ///
    /// Returns `Err(ConfigError::DuplicateProviderType)` if the id is taken;
    /// the first registration is left untouched.
    pub fn register<F>(
        &mut self,
        provider_type: impl Into<ProviderTypeId>,
        description: &str,
        factory: F,
    ) -> ConfigResult<()>
    where
        F: Fn(ProviderTypeId, RawProviderConfig) -> Box<dyn ProviderConfigView> + Send + Sync + 'static,
    {
        let provider_type = provider_type.into();
        if self.descriptors.contains_key(&provider_type) {
            return Err(ConfigError::DuplicateProviderType(provider_type.to_string()));
        }

        self.insert(provider_type, description, Arc::new(factory), false);
        Ok(())
    }

    fn insert(
        &mut self,
        provider_type: impl Into<ProviderTypeId>,
        description: &str,
        factory: ViewFactory,
        builtin: bool,
    ) {
        let provider_type = provider_type.into();
        self.descriptors.insert(
            provider_type.clone(),
            ProviderDescriptor {
                provider_type,
                description: description.to_string(),
                factory,
                builtin,
            },
        );
    }

    /// Look up the descriptor of a provider type
    ///
    /// Returns `Err(ConfigError::UnknownProviderType)` if the id is not registered.
    pub fn resolve(&self, provider_type: &str) -> ConfigResult<&ProviderDescriptor> {
        self.descriptors
            .get(provider_type)
            .ok_or_else(|| ConfigError::UnknownProviderType(provider_type.to_string()))
    }

    pub fn descriptor(&self, provider_type: &str) -> Option<&ProviderDescriptor> {
        self.descriptors.get(provider_type)
    }

    /// Check if a provider type is registered
    pub fn contains(&self, provider_type: &str) -> bool {
        self.descriptors.contains_key(provider_type)
    }

    /// List all registered provider types, sorted by id
    pub fn list(&self) -> Vec<&ProviderDescriptor> {
        let mut descriptors: Vec<&ProviderDescriptor> = self.descriptors.values().collect();
        descriptors.sort_by(|a, b| a.provider_type.cmp(&b.provider_type));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CustomOidcProviderConfig;

    #[test]
    fn test_builtin_types_registered() {
        let registry = ProviderTypeRegistry::with_builtin_types();
        assert!(registry.contains("oidc"));
        assert!(registry.contains("keycloak-oidc"));
        assert!(registry.contains("saml"));
        assert!(!registry.contains("custom-oidc"));
        assert!(registry.list().iter().all(|d| d.builtin));
        assert_eq!(registry.descriptor("saml").map(|d| d.description.as_str()), Some("SAML v2.0"));
        assert!(registry.descriptor("SAML").is_none());
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = ProviderTypeRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.resolve("nonexistent_xyz"),
            Err(ConfigError::UnknownProviderType(id)) if id == "nonexistent_xyz"
        ));
    }

    #[test]
    fn test_duplicate_keeps_first_registration() {
        let mut registry = ProviderTypeRegistry::new();
        registry
            .register("custom-oidc", "first", |t, raw| Box::new(CustomOidcProviderConfig::new(t, raw)))
            .unwrap();

        let second = registry.register("custom-oidc", "second", |t, raw| {
            Box::new(SamlProviderConfig::new(t, raw))
        });
        assert!(matches!(second, Err(ConfigError::DuplicateProviderType(_))));

        let descriptor = registry.resolve("custom-oidc").unwrap();
        assert_eq!(descriptor.description, "first");
        assert!(!descriptor.builtin);
        let view = descriptor.build(RawProviderConfig::for_type("custom-oidc"));
        assert!(view.is::<CustomOidcProviderConfig>());
    }

    #[test]
    fn test_builtin_ids_cannot_be_replaced() {
        let mut registry = ProviderTypeRegistry::with_builtin_types();
        let result = registry.register("oidc", "shadow", |t, raw| Box::new(SamlProviderConfig::new(t, raw)));
        assert!(matches!(result, Err(ConfigError::DuplicateProviderType(id)) if id == "oidc"));
    }

    #[test]
    fn test_factory_receives_provider_type() {
        let registry = ProviderTypeRegistry::with_builtin_types();
        let view = registry
            .resolve("keycloak-oidc")
            .unwrap()
            .build(RawProviderConfig::for_type("keycloak-oidc"));
        assert_eq!(view.provider_type().as_str(), "keycloak-oidc");
        assert!(view.is::<OidcProviderConfig>());
    }

    #[test]
    fn test_list_sorted() {
        let registry = ProviderTypeRegistry::with_builtin_types();
        let ids: Vec<&str> = registry.list().iter().map(|d| d.provider_type.as_str()).collect();
        assert_eq!(ids, vec!["keycloak-oidc", "oidc", "saml"]);
        assert_eq!(registry.len(), 3);
    }
}
