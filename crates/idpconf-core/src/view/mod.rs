//! Typed provider configuration views
//!
//! A view wraps one provider instance's raw configuration and exposes one
//! accessor per declared `Setting`. Built-in views:
//! - `OidcProviderConfig` (`oidc`, `keycloak-oidc`)
//! - `SamlProviderConfig` (`saml`)
//!
//! `CustomOidcProviderConfig` (`custom-oidc`) shows how an extension adds
//! settings on top of a built-in view.

mod setting;
mod reader;
mod traits;
pub mod oidc;
pub mod saml;
pub mod custom_oidc;

pub use setting::{parse_enum, ConfigValue, Presence, Setting, SettingInfo, ValueShape};
pub use reader::ConfigReader;
pub use traits::{common_settings, CommonProviderSettings, ProviderConfigView, SyncMode};
pub use oidc::{ClientAuthMethod, OidcProviderConfig};
pub use saml::{KeyNameTransformer, SamlProviderConfig, SignatureAlgorithm};
pub use custom_oidc::{CustomOidcProviderConfig, CUSTOM_OIDC_TYPE};
