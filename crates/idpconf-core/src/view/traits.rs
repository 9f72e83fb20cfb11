//! Provider configuration view trait and settings shared by every provider type

use std::any::Any;
use std::collections::HashSet;
use std::fmt;

use crate::error::ConfigResult;
use crate::types::{ProviderTypeId, RawProviderConfig, PROVIDER_TYPE_KEY};
use super::reader::ConfigReader;
use super::setting::{parse_enum, ConfigValue, Setting, SettingInfo, ValueShape};

/// Typed, read-only projection over one provider instance's configuration
///
/// Views are built by the factory registered for their provider type and
/// handed to the caller per resolution; they are cheap to construct and
/// never validate on construction. Required settings surface as
/// `MissingRequiredConfig` on first access, or eagerly through `validate()`.
///
/// Implementations:
/// - `OidcProviderConfig`: `oidc` and `keycloak-oidc`
/// - `SamlProviderConfig`: `saml`
/// - `CustomOidcProviderConfig`: `custom-oidc` extension
pub trait ProviderConfigView: Any + Send + Sync + fmt::Debug {
    /// The reader over this view's configuration
    fn reader(&self) -> &ConfigReader;

    /// Every setting this view declares an accessor for
    fn settings(&self) -> Vec<SettingInfo>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// The provider type this view was built for
    fn provider_type(&self) -> &ProviderTypeId {
        self.reader().provider_type()
    }

    /// Check every declared setting, reporting the first problem found
    fn validate(&self) -> ConfigResult<()> {
        for info in self.settings() {
            self.reader().check(&info)?;
        }
        Ok(())
    }

    /// Raw value of any key
    fn attribute(&self, key: &str) -> Option<&str> {
        self.reader().attribute(key)
    }

    /// Stored keys no declared setting covers, sorted
    fn extra_attributes(&self) -> Vec<(&str, &str)> {
        let declared: HashSet<&str> = self.settings().iter().map(|info| info.key).collect();
        let raw: &RawProviderConfig = self.reader().raw();
        raw.keys()
            .into_iter()
            .filter(|key| *key != PROVIDER_TYPE_KEY && !declared.contains(key))
            .filter_map(|key| raw.get(key).map(|value| (key, value)))
            .collect()
    }
}

impl dyn ProviderConfigView {
    /// Borrow the view as a concrete view type
    pub fn downcast_ref<V: ProviderConfigView>(&self) -> Option<&V> {
        self.as_any().downcast_ref::<V>()
    }

    /// Whether the view is of the concrete type `V`
    pub fn is<V: ProviderConfigView>(&self) -> bool {
        self.as_any().is::<V>()
    }
}

/// How brokered user data is synchronised on each login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Import on first login only
    Import,
    /// Behaviour configured by mappers (pre-sync-mode semantics)
    Legacy,
    /// Overwrite on every login
    Force,
}

const SYNC_MODES: [(&str, SyncMode); 3] = [
    ("IMPORT", SyncMode::Import),
    ("LEGACY", SyncMode::Legacy),
    ("FORCE", SyncMode::Force),
];

impl ConfigValue for SyncMode {
    fn shape() -> ValueShape {
        ValueShape::Enumeration(&["IMPORT", "LEGACY", "FORCE"])
    }

    fn parse_value(raw: &str) -> Result<Self, String> {
        parse_enum(raw, &SYNC_MODES)
    }
}

pub const DISPLAY_NAME: Setting<String> =
    Setting::optional("displayName", "Name shown on the login page");
pub const ENABLED: Setting<bool> =
    Setting::with_default("enabled", "true", "Whether the provider can be used to log in");
pub const HIDE_ON_LOGIN_PAGE: Setting<bool> =
    Setting::with_default("hideOnLoginPage", "false", "Hide the provider button on the login page");
pub const TRUST_EMAIL: Setting<bool> =
    Setting::with_default("trustEmail", "false", "Treat emails from the provider as verified");
pub const STORE_TOKEN: Setting<bool> =
    Setting::with_default("storeToken", "false", "Keep the provider tokens after login");
pub const LINK_ONLY: Setting<bool> =
    Setting::with_default("linkOnly", "false", "Only allow linking, never logging in");
pub const AUTHENTICATE_BY_DEFAULT: Setting<bool> = Setting::with_default(
    "authenticateByDefault",
    "false",
    "Redirect to the provider without showing the login page",
);
pub const ADD_READ_TOKEN_ROLE_ON_CREATE: Setting<bool> = Setting::with_default(
    "addReadTokenRoleOnCreate",
    "false",
    "Grant new users the role to read stored provider tokens",
);
pub const SYNC_MODE: Setting<SyncMode> =
    Setting::with_default("syncMode", "IMPORT", "How user data is synchronised on login");
pub const FIRST_BROKER_LOGIN_FLOW: Setting<String> = Setting::with_default(
    "firstBrokerLoginFlowAlias",
    "first broker login",
    "Flow run the first time a user logs in through the provider",
);
pub const POST_BROKER_LOGIN_FLOW: Setting<String> =
    Setting::optional("postBrokerLoginFlowAlias", "Flow run after every brokered login");

/// Settings every provider type declares
pub fn common_settings() -> Vec<SettingInfo> {
    vec![
        DISPLAY_NAME.info(),
        ENABLED.info(),
        HIDE_ON_LOGIN_PAGE.info(),
        TRUST_EMAIL.info(),
        STORE_TOKEN.info(),
        LINK_ONLY.info(),
        AUTHENTICATE_BY_DEFAULT.info(),
        ADD_READ_TOKEN_ROLE_ON_CREATE.info(),
        SYNC_MODE.info(),
        FIRST_BROKER_LOGIN_FLOW.info(),
        POST_BROKER_LOGIN_FLOW.info(),
    ]
}

/// Accessors for the settings shared by every provider type
///
/// Implemented for every view, including extension views registered by
/// other crates.
pub trait CommonProviderSettings: ProviderConfigView {
    fn display_name(&self) -> ConfigResult<Option<String>> {
        self.reader().read_opt(&DISPLAY_NAME)
    }

    fn enabled(&self) -> ConfigResult<bool> {
        self.reader().read(&ENABLED)
    }

    fn hide_on_login_page(&self) -> ConfigResult<bool> {
        self.reader().read(&HIDE_ON_LOGIN_PAGE)
    }

    fn trust_email(&self) -> ConfigResult<bool> {
        self.reader().read(&TRUST_EMAIL)
    }

    fn store_token(&self) -> ConfigResult<bool> {
        self.reader().read(&STORE_TOKEN)
    }

    fn link_only(&self) -> ConfigResult<bool> {
        self.reader().read(&LINK_ONLY)
    }

    fn authenticate_by_default(&self) -> ConfigResult<bool> {
        self.reader().read(&AUTHENTICATE_BY_DEFAULT)
    }

    fn add_read_token_role_on_create(&self) -> ConfigResult<bool> {
        self.reader().read(&ADD_READ_TOKEN_ROLE_ON_CREATE)
    }

    fn sync_mode(&self) -> ConfigResult<SyncMode> {
        self.reader().read(&SYNC_MODE)
    }

    fn first_broker_login_flow(&self) -> ConfigResult<String> {
        self.reader().read(&FIRST_BROKER_LOGIN_FLOW)
    }

    fn post_broker_login_flow(&self) -> ConfigResult<Option<String>> {
        self.reader().read_opt(&POST_BROKER_LOGIN_FLOW)
    }
}

impl<V: ProviderConfigView + ?Sized> CommonProviderSettings for V {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_mode_parsing() {
        assert_eq!(SyncMode::parse_value("FORCE"), Ok(SyncMode::Force));
        assert!(SyncMode::parse_value("force").is_err());
    }

    #[test]
    fn test_common_defaults_parse() {
        for info in common_settings() {
            if let Some(default) = info.default_value() {
                assert!(info.check(default).is_ok(), "default of {} does not parse", info.key);
            }
        }
    }

    #[test]
    fn test_login_flag_settings() {
        use crate::view::SamlProviderConfig;

        let defaults = SamlProviderConfig::new(ProviderTypeId::from("saml"), RawProviderConfig::for_type("saml"));
        assert!(!defaults.authenticate_by_default().unwrap());
        assert!(!defaults.add_read_token_role_on_create().unwrap());

        let raw = RawProviderConfig::for_type("saml")
            .with("authenticateByDefault", "true")
            .with("addReadTokenRoleOnCreate", "TRUE");
        let stored = SamlProviderConfig::new(ProviderTypeId::from("saml"), raw);
        assert!(stored.authenticate_by_default().unwrap());
        assert!(stored.add_read_token_role_on_create().unwrap());
        assert!(stored.extra_attributes().is_empty());

        let keys: Vec<&str> = common_settings().iter().map(|info| info.key).collect();
        assert!(keys.contains(&"authenticateByDefault"));
        assert!(keys.contains(&"addReadTokenRoleOnCreate"));
    }

    #[test]
    fn test_common_keys_unique() {
        let settings = common_settings();
        let keys: HashSet<&str> = settings.iter().map(|info| info.key).collect();
        assert_eq!(keys.len(), settings.len());
    }
}
