//! idpconf Core
//!
//! Identity-provider configuration for federated authentication brokers.
//! Raw per-instance configuration lives in a `ConfigStore`; a
//! `ProviderTypeRegistry` maps each provider type to the factory of its
//! typed view; `ConfigResolver` ties the two together.
//!
//! ## Resolution
//!
//! ```rust
//! use std::sync::Arc;
//! use idpconf_core::{ConfigResolver, MemoryConfigStore, ProviderTypeRegistry, RawProviderConfig};
//! use idpconf_core::store::ConfigStore;
//! use idpconf_core::view::{CommonProviderSettings, OidcProviderConfig};
//!
//! // Startup: register provider types once
//! let registry = Arc::new(ProviderTypeRegistry::with_builtin_types());
//!
//! let store = Arc::new(MemoryConfigStore::new());
//! store.put(
//!     "corp-sso",
//!     RawProviderConfig::for_type("oidc")
//!         .with("clientId", "broker")
//!         .with("tokenUrl", "https://sso.example.com/token"),
//! ).unwrap();
//!
//! // Per authentication attempt
//! let resolver = ConfigResolver::new(store, registry);
//! let oidc = resolver.resolve_as::<OidcProviderConfig>("corp-sso").unwrap();
//! assert_eq!(oidc.client_id().unwrap(), "broker");
//! assert!(oidc.backchannel_supported().unwrap());
//! assert!(!oidc.hide_on_login_page().unwrap());
//! ```

pub mod error;
pub mod types;
pub mod logging;
pub mod store;
pub mod view;
pub mod registry;
pub mod secrets;
pub mod resolver;

pub use error::{ConfigError, ConfigResult};

pub use types::{ProviderTypeId, RawProviderConfig, PROVIDER_TYPE_KEY};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, MemoryLogger, SharedLogger};

pub use store::{ConfigStore, MemoryConfigStore, FileConfigStore};

pub use view::{
    ProviderConfigView, CommonProviderSettings, ConfigReader, Setting, SettingInfo, ValueShape,
    OidcProviderConfig, SamlProviderConfig, CustomOidcProviderConfig,
};

pub use registry::{ProviderTypeRegistry, ProviderDescriptor, ViewFactory};

pub use secrets::{
    SecretStore, SecretStoreError, SecretStoreResult,
    EnvSecretStore, MemorySecretStore, ChainSecretStore,
};

pub use resolver::ConfigResolver;
