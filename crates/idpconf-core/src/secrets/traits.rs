//! Secret store trait

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretStoreError {
    /// The store cannot be written to
    #[error("Secret store {store} is read-only")]
    ReadOnly { store: String },

    #[error("No secret named {0}")]
    NotFound(String),

    #[error("Secret store error: {0}")]
    Other(String),
}

impl SecretStoreError {
    pub fn read_only(store: impl Into<String>) -> Self {
        Self::ReadOnly { store: store.into() }
    }
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Backend holding the credentials that vault references point at
///
/// A provider configuration stores `${vault.partner_secret}` rather than the
/// secret; the store maps `partner_secret` to the credential. Lookups are
/// plain names, never raw configuration keys.
///
/// Built-in: `EnvSecretStore`, `MemorySecretStore`, `ChainSecretStore`.
/// Brokers plug in their own (database, HSM, external vault).
pub trait SecretStore: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the backend can currently be queried
    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, name: &str) -> Option<String>;

    /// Store or replace a secret
    fn store(&self, name: &str, value: &str) -> SecretStoreResult<()>;

    /// Remove a secret
    fn delete(&self, name: &str) -> SecretStoreResult<()>;

    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Name of the store that serves `name`, if any does
    fn source_of(&self, name: &str) -> Option<&str> {
        if self.has(name) {
            Some(self.name())
        } else {
            None
        }
    }
}
