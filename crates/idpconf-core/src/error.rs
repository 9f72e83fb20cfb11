//! Configuration error types

use thiserror::Error;

/// Errors that can occur while storing, reading or resolving provider configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration is stored for the instance
    #[error("No such provider instance: {0}")]
    NotFound(String),

    /// The stored configuration carries no `providerType`
    #[error("Provider instance {0} has no providerType")]
    MissingProviderType(String),

    /// No factory is registered for the provider type
    #[error("Unknown provider type: {0}")]
    UnknownProviderType(String),

    /// A provider type was registered twice
    #[error("Provider type already registered: {0}")]
    DuplicateProviderType(String),

    /// A required setting is absent or blank
    #[error("Missing required configuration: {key}")]
    MissingRequiredConfig { key: String },

    /// A stored value does not parse into its declared shape
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    /// A resolved view is not of the requested concrete type
    #[error("Provider type {provider_type} does not produce a {expected} view")]
    ViewTypeMismatch {
        provider_type: String,
        expected: &'static str,
    },

    /// A vault reference could not be found in the secret store
    #[error("Secret {reference} referenced by {key} could not be resolved")]
    UnresolvedSecret { key: String, reference: String },

    /// The process-wide registry was installed twice
    #[error("Global provider type registry is already installed")]
    RegistryAlreadyInstalled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create a missing required configuration error
    pub fn missing_required(key: impl Into<String>) -> Self {
        Self::MissingRequiredConfig { key: key.into() }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an unresolved secret error
    pub fn unresolved_secret(key: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::UnresolvedSecret {
            key: key.into(),
            reference: reference.into(),
        }
    }

    /// Whether the error points at a misconfigured instance rather than a missing one
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            Self::MissingProviderType(_)
                | Self::UnknownProviderType(_)
                | Self::MissingRequiredConfig { .. }
                | Self::InvalidConfigValue { .. }
                | Self::UnresolvedSecret { .. }
        )
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
