//! Vault references in credential-bearing settings
//!
//! A credential value of the form `${vault.<name>}` is not the credential
//! itself but a pointer to secret `<name>` in a `SecretStore`. Any other
//! value is a literal credential.

use crate::error::{ConfigError, ConfigResult};
use super::traits::SecretStore;

const VAULT_PREFIX: &str = "${vault.";
const VAULT_SUFFIX: &str = "}";

/// Secret name referenced by `value`, if it is a vault reference
pub fn parse_vault_reference(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix(VAULT_PREFIX)?
        .strip_suffix(VAULT_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// Expand a credential stored under `key`
///
/// Literal values are returned unchanged. Vault references are looked up in
/// `secrets`; a reference that resolves to nothing fails with
/// `UnresolvedSecret` rather than falling back to the literal text.
pub fn resolve_credential(key: &str, value: &str, secrets: &dyn SecretStore) -> ConfigResult<String> {
    match parse_vault_reference(value) {
        Some(name) => secrets
            .get(name)
            .ok_or_else(|| ConfigError::unresolved_secret(key, name)),
        None => Ok(value.to_string()),
    }
}
