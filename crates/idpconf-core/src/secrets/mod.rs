//! Secret storage for provider credentials
//!
//! Credential-bearing settings (such as an OIDC client secret) may hold a
//! `${vault.<name>}` reference instead of the credential. This module
//! provides:
//! - `SecretStore` trait for implementing custom stores
//! - Built-in implementations: `EnvSecretStore`, `MemorySecretStore`, `ChainSecretStore`
//! - Vault reference expansion (`resolve_credential`)

mod traits;
mod env_store;
mod memory_store;
mod chain_store;
mod vault;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use env_store::{EnvSecretStore, ENV_PREFIX};
pub use memory_store::MemorySecretStore;
pub use chain_store::ChainSecretStore;
pub use vault::{parse_vault_reference, resolve_credential};
