//! OpenID Connect provider configuration

use std::any::Any;

use url::Url;

use crate::error::ConfigResult;
use crate::secrets::{resolve_credential, SecretStore};
use crate::types::{ProviderTypeId, RawProviderConfig};
use super::reader::ConfigReader;
use super::setting::{parse_enum, ConfigValue, Setting, SettingInfo, ValueShape};
use super::traits::{common_settings, ProviderConfigView};

/// How the broker authenticates to the provider's token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuthMethod {
    ClientSecretPost,
    ClientSecretBasic,
    ClientSecretJwt,
    PrivateKeyJwt,
}

const CLIENT_AUTH_METHODS: [(&str, ClientAuthMethod); 4] = [
    ("client_secret_post", ClientAuthMethod::ClientSecretPost),
    ("client_secret_basic", ClientAuthMethod::ClientSecretBasic),
    ("client_secret_jwt", ClientAuthMethod::ClientSecretJwt),
    ("private_key_jwt", ClientAuthMethod::PrivateKeyJwt),
];

impl ClientAuthMethod {
    /// Whether this method sends the client secret (directly or as an HMAC key)
    pub fn uses_client_secret(&self) -> bool {
        !matches!(self, ClientAuthMethod::PrivateKeyJwt)
    }
}

impl ConfigValue for ClientAuthMethod {
    fn shape() -> ValueShape {
        ValueShape::Enumeration(&[
            "client_secret_post",
            "client_secret_basic",
            "client_secret_jwt",
            "private_key_jwt",
        ])
    }

    fn parse_value(raw: &str) -> Result<Self, String> {
        parse_enum(raw, &CLIENT_AUTH_METHODS)
    }
}

pub const CLIENT_ID: Setting<String> =
    Setting::required("clientId", "Client ID registered at the provider");
pub const CLIENT_SECRET: Setting<String> =
    Setting::required("clientSecret", "Client secret, or a ${vault.<name>} reference");
pub const AUTHORIZATION_URL: Setting<Url> =
    Setting::required("authorizationUrl", "Authorization endpoint");
pub const TOKEN_URL: Setting<Url> = Setting::required("tokenUrl", "Token endpoint");
pub const USER_INFO_URL: Setting<Url> = Setting::optional("userInfoUrl", "User info endpoint");
pub const JWKS_URL: Setting<Url> = Setting::optional("jwksUrl", "JSON Web Key Set URL");
pub const LOGOUT_URL: Setting<Url> = Setting::optional("logoutUrl", "End session endpoint");
pub const ISSUER: Setting<String> = Setting::optional("issuer", "Expected token issuer");
pub const LOGIN_HINT: Setting<String> =
    Setting::optional("loginHint", "Login hint forwarded to the provider");
pub const DEFAULT_SCOPE: Setting<String> =
    Setting::with_default("defaultScope", "openid", "Scopes requested on authorization");
pub const CLIENT_AUTH_METHOD: Setting<ClientAuthMethod> = Setting::with_default(
    "clientAuthMethod",
    "client_secret_post",
    "Token endpoint client authentication",
);
pub const BACKCHANNEL_SUPPORTED: Setting<bool> =
    Setting::with_default("backchannelSupported", "true", "Provider supports backchannel logout");
pub const VALIDATE_SIGNATURE: Setting<bool> =
    Setting::with_default("validateSignature", "false", "Validate token signatures");
pub const UI_LOCALES: Setting<bool> =
    Setting::with_default("uiLocales", "false", "Pass the current locale to the provider");
pub const PKCE_ENABLED: Setting<bool> =
    Setting::with_default("pkceEnabled", "false", "Use PKCE on the authorization code flow");
// Absent means "derive from whether the endpoint is configured"
pub const USE_JWKS_URL: Setting<bool> =
    Setting::optional("useJwksUrl", "Fetch signature keys from jwksUrl");
pub const DISABLE_USER_INFO: Setting<bool> =
    Setting::optional("disableUserInfo", "Never call the user info endpoint");

/// Settings declared by OIDC views, common settings included
pub fn oidc_settings() -> Vec<SettingInfo> {
    let mut settings = common_settings();
    settings.extend([
        CLIENT_ID.info(),
        CLIENT_SECRET.info(),
        AUTHORIZATION_URL.info(),
        TOKEN_URL.info(),
        USER_INFO_URL.info(),
        JWKS_URL.info(),
        LOGOUT_URL.info(),
        ISSUER.info(),
        LOGIN_HINT.info(),
        DEFAULT_SCOPE.info(),
        CLIENT_AUTH_METHOD.info(),
        BACKCHANNEL_SUPPORTED.info(),
        VALIDATE_SIGNATURE.info(),
        UI_LOCALES.info(),
        PKCE_ENABLED.info(),
        USE_JWKS_URL.info(),
        DISABLE_USER_INFO.info(),
    ]);
    settings
}

/// Configuration of an OpenID Connect identity provider
#[derive(Debug, Clone)]
pub struct OidcProviderConfig {
    reader: ConfigReader,
}

impl OidcProviderConfig {
    pub fn new(provider_type: ProviderTypeId, raw: RawProviderConfig) -> Self {
        Self {
            reader: ConfigReader::new(provider_type, raw),
        }
    }

    pub fn client_id(&self) -> ConfigResult<String> {
        self.reader.read(&CLIENT_ID)
    }

    /// The stored client secret, vault references left unexpanded
    pub fn client_secret(&self) -> ConfigResult<String> {
        self.reader.read(&CLIENT_SECRET)
    }

    /// The client secret with any vault reference expanded through `secrets`
    pub fn resolved_client_secret(&self, secrets: &dyn SecretStore) -> ConfigResult<String> {
        let stored = self.client_secret()?;
        resolve_credential(CLIENT_SECRET.key(), &stored, secrets)
    }

    pub fn authorization_url(&self) -> ConfigResult<Url> {
        self.reader.read(&AUTHORIZATION_URL)
    }

    pub fn token_url(&self) -> ConfigResult<Url> {
        self.reader.read(&TOKEN_URL)
    }

    pub fn user_info_url(&self) -> ConfigResult<Option<Url>> {
        self.reader.read_opt(&USER_INFO_URL)
    }

    pub fn jwks_url(&self) -> ConfigResult<Option<Url>> {
        self.reader.read_opt(&JWKS_URL)
    }

    pub fn logout_url(&self) -> ConfigResult<Option<Url>> {
        self.reader.read_opt(&LOGOUT_URL)
    }

    pub fn issuer(&self) -> ConfigResult<Option<String>> {
        self.reader.read_opt(&ISSUER)
    }

    pub fn login_hint(&self) -> ConfigResult<Option<String>> {
        self.reader.read_opt(&LOGIN_HINT)
    }

    pub fn default_scope(&self) -> ConfigResult<String> {
        self.reader.read(&DEFAULT_SCOPE)
    }

    pub fn client_auth_method(&self) -> ConfigResult<ClientAuthMethod> {
        self.reader.read(&CLIENT_AUTH_METHOD)
    }

    pub fn backchannel_supported(&self) -> ConfigResult<bool> {
        self.reader.read(&BACKCHANNEL_SUPPORTED)
    }

    pub fn validate_signature(&self) -> ConfigResult<bool> {
        self.reader.read(&VALIDATE_SIGNATURE)
    }

    pub fn ui_locales(&self) -> ConfigResult<bool> {
        self.reader.read(&UI_LOCALES)
    }

    pub fn pkce_enabled(&self) -> ConfigResult<bool> {
        self.reader.read(&PKCE_ENABLED)
    }

    /// Whether signature keys come from the JWKS endpoint
    ///
    /// A stored `useJwksUrl` wins; otherwise true when `jwksUrl` is set.
    pub fn use_jwks_url(&self) -> ConfigResult<bool> {
        Ok(self
            .reader
            .read_opt(&USE_JWKS_URL)?
            .unwrap_or_else(|| self.reader.is_set(JWKS_URL.key())))
    }

    /// Whether the user info endpoint is called
    ///
    /// A stored `disableUserInfo` wins; otherwise true when `userInfoUrl` is set.
    pub fn user_info_enabled(&self) -> ConfigResult<bool> {
        Ok(match self.reader.read_opt(&DISABLE_USER_INFO)? {
            Some(disabled) => !disabled,
            None => self.reader.is_set(USER_INFO_URL.key()),
        })
    }
}

impl ProviderConfigView for OidcProviderConfig {
    fn reader(&self) -> &ConfigReader {
        &self.reader
    }

    fn settings(&self) -> Vec<SettingInfo> {
        oidc_settings()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
