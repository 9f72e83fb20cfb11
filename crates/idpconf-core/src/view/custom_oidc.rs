//! `custom-oidc` extension: OIDC configuration plus one custom attribute
//!
//! This provider type is not built in. A broker opts in by calling
//! [`CustomOidcProviderConfig::register`] during startup, the same way any
//! third-party provider type would.

use std::any::Any;

use crate::error::ConfigResult;
use crate::registry::ProviderTypeRegistry;
use crate::types::{ProviderTypeId, RawProviderConfig};
use super::oidc::{oidc_settings, OidcProviderConfig};
use super::reader::ConfigReader;
use super::setting::{Setting, SettingInfo};
use super::traits::ProviderConfigView;

/// Provider type id of the extension
pub const CUSTOM_OIDC_TYPE: &str = "custom-oidc";

// Blank is the documented default; whether blank is meaningful to the
// consuming authenticator is up to that authenticator.
pub const DUMMY_CONFIG: Setting<String> =
    Setting::with_default("dummyConfig", "", "Custom attribute of the custom-oidc provider");

/// Configuration of a `custom-oidc` identity provider
#[derive(Debug, Clone)]
pub struct CustomOidcProviderConfig {
    oidc: OidcProviderConfig,
}

impl CustomOidcProviderConfig {
    pub fn new(provider_type: ProviderTypeId, raw: RawProviderConfig) -> Self {
        Self {
            oidc: OidcProviderConfig::new(provider_type, raw),
        }
    }

    /// Register the `custom-oidc` provider type
    pub fn register(registry: &mut ProviderTypeRegistry) -> ConfigResult<()> {
        registry.register(
            CUSTOM_OIDC_TYPE,
            "OpenID Connect with custom attributes",
            |provider_type, raw| Box::new(CustomOidcProviderConfig::new(provider_type, raw)),
        )
    }

    /// The stock OIDC accessors of this provider
    pub fn oidc(&self) -> &OidcProviderConfig {
        &self.oidc
    }

    /// `dummyConfig`, blank when absent
    pub fn dummy_config(&self) -> ConfigResult<String> {
        self.oidc.reader().read(&DUMMY_CONFIG)
    }
}

impl ProviderConfigView for CustomOidcProviderConfig {
    fn reader(&self) -> &ConfigReader {
        self.oidc.reader()
    }

    fn settings(&self) -> Vec<SettingInfo> {
        let mut settings = oidc_settings();
        settings.push(DUMMY_CONFIG.info());
        settings
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
