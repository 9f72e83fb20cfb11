//! SAML 2.0 provider configuration

use std::any::Any;

use url::Url;

use crate::error::ConfigResult;
use crate::types::{ProviderTypeId, RawProviderConfig};
use super::reader::ConfigReader;
use super::setting::{parse_enum, ConfigValue, Setting, SettingInfo, ValueShape};
use super::traits::{common_settings, ProviderConfigView};

/// Algorithm used to sign SAML requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    RsaSha256,
    RsaSha1,
    RsaSha512,
    DsaSha1,
}

const SIGNATURE_ALGORITHMS: [(&str, SignatureAlgorithm); 4] = [
    ("RSA_SHA256", SignatureAlgorithm::RsaSha256),
    ("RSA_SHA1", SignatureAlgorithm::RsaSha1),
    ("RSA_SHA512", SignatureAlgorithm::RsaSha512),
    ("DSA_SHA1", SignatureAlgorithm::DsaSha1),
];

impl ConfigValue for SignatureAlgorithm {
    fn shape() -> ValueShape {
        ValueShape::Enumeration(&["RSA_SHA256", "RSA_SHA1", "RSA_SHA512", "DSA_SHA1"])
    }

    fn parse_value(raw: &str) -> Result<Self, String> {
        parse_enum(raw, &SIGNATURE_ALGORITHMS)
    }
}

/// What goes into the KeyName of signed XML documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyNameTransformer {
    None,
    KeyId,
    CertSubject,
}

const KEY_NAME_TRANSFORMERS: [(&str, KeyNameTransformer); 3] = [
    ("NONE", KeyNameTransformer::None),
    ("KEY_ID", KeyNameTransformer::KeyId),
    ("CERT_SUBJECT", KeyNameTransformer::CertSubject),
];

impl ConfigValue for KeyNameTransformer {
    fn shape() -> ValueShape {
        ValueShape::Enumeration(&["NONE", "KEY_ID", "CERT_SUBJECT"])
    }

    fn parse_value(raw: &str) -> Result<Self, String> {
        parse_enum(raw, &KEY_NAME_TRANSFORMERS)
    }
}

pub const SINGLE_SIGN_ON_SERVICE_URL: Setting<Url> =
    Setting::required("singleSignOnServiceUrl", "Single sign-on service endpoint");
pub const SINGLE_LOGOUT_SERVICE_URL: Setting<Url> =
    Setting::optional("singleLogoutServiceUrl", "Single logout service endpoint");
pub const SIGNING_CERTIFICATE: Setting<String> =
    Setting::optional("signingCertificate", "PEM certificate used to validate signatures");
pub const NAME_ID_POLICY_FORMAT: Setting<String> = Setting::with_default(
    "nameIDPolicyFormat",
    "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent",
    "Requested name identifier format",
);
pub const SIGNATURE_ALGORITHM: Setting<SignatureAlgorithm> =
    Setting::with_default("signatureAlgorithm", "RSA_SHA256", "Request signature algorithm");
pub const KEY_NAME_TRANSFORMER: Setting<KeyNameTransformer> = Setting::with_default(
    "xmlSignKeyInfoKeyNameTransformer",
    "KEY_ID",
    "KeyName written into signed documents",
);
pub const POST_BINDING_AUTHN_REQUEST: Setting<bool> =
    Setting::with_default("postBindingAuthnRequest", "false", "Send AuthnRequest with HTTP-POST");
pub const POST_BINDING_RESPONSE: Setting<bool> =
    Setting::with_default("postBindingResponse", "false", "Respond with HTTP-POST");
pub const POST_BINDING_LOGOUT: Setting<bool> =
    Setting::with_default("postBindingLogout", "false", "Send logout requests with HTTP-POST");
pub const FORCE_AUTHN: Setting<bool> =
    Setting::with_default("forceAuthn", "false", "Ask the provider to re-authenticate the user");
pub const WANT_AUTHN_REQUESTS_SIGNED: Setting<bool> =
    Setting::with_default("wantAuthnRequestsSigned", "false", "Sign AuthnRequests");
pub const WANT_ASSERTIONS_SIGNED: Setting<bool> =
    Setting::with_default("wantAssertionsSigned", "false", "Require signed assertions");
pub const WANT_ASSERTIONS_ENCRYPTED: Setting<bool> =
    Setting::with_default("wantAssertionsEncrypted", "false", "Require encrypted assertions");
pub const VALIDATE_SIGNATURE: Setting<bool> =
    Setting::with_default("validateSignature", "false", "Validate response signatures");
pub const BACKCHANNEL_SUPPORTED: Setting<bool> =
    Setting::with_default("backchannelSupported", "true", "Provider supports backchannel logout");

/// Settings declared by SAML views, common settings included
pub fn saml_settings() -> Vec<SettingInfo> {
    let mut settings = common_settings();
    settings.extend([
        SINGLE_SIGN_ON_SERVICE_URL.info(),
        SINGLE_LOGOUT_SERVICE_URL.info(),
        SIGNING_CERTIFICATE.info(),
        NAME_ID_POLICY_FORMAT.info(),
        SIGNATURE_ALGORITHM.info(),
        KEY_NAME_TRANSFORMER.info(),
        POST_BINDING_AUTHN_REQUEST.info(),
        POST_BINDING_RESPONSE.info(),
        POST_BINDING_LOGOUT.info(),
        FORCE_AUTHN.info(),
        WANT_AUTHN_REQUESTS_SIGNED.info(),
        WANT_ASSERTIONS_SIGNED.info(),
        WANT_ASSERTIONS_ENCRYPTED.info(),
        VALIDATE_SIGNATURE.info(),
        BACKCHANNEL_SUPPORTED.info(),
    ]);
    settings
}

/// Configuration of a SAML 2.0 identity provider
#[derive(Debug, Clone)]
pub struct SamlProviderConfig {
    reader: ConfigReader,
}

impl SamlProviderConfig {
    pub fn new(provider_type: ProviderTypeId, raw: RawProviderConfig) -> Self {
        Self {
            reader: ConfigReader::new(provider_type, raw),
        }
    }

    pub fn single_sign_on_service_url(&self) -> ConfigResult<Url> {
        self.reader.read(&SINGLE_SIGN_ON_SERVICE_URL)
    }

    pub fn single_logout_service_url(&self) -> ConfigResult<Option<Url>> {
        self.reader.read_opt(&SINGLE_LOGOUT_SERVICE_URL)
    }

    pub fn signing_certificate(&self) -> ConfigResult<Option<String>> {
        self.reader.read_opt(&SIGNING_CERTIFICATE)
    }

    pub fn name_id_policy_format(&self) -> ConfigResult<String> {
        self.reader.read(&NAME_ID_POLICY_FORMAT)
    }

    pub fn signature_algorithm(&self) -> ConfigResult<SignatureAlgorithm> {
        self.reader.read(&SIGNATURE_ALGORITHM)
    }

    pub fn key_name_transformer(&self) -> ConfigResult<KeyNameTransformer> {
        self.reader.read(&KEY_NAME_TRANSFORMER)
    }

    pub fn post_binding_authn_request(&self) -> ConfigResult<bool> {
        self.reader.read(&POST_BINDING_AUTHN_REQUEST)
    }

    pub fn post_binding_response(&self) -> ConfigResult<bool> {
        self.reader.read(&POST_BINDING_RESPONSE)
    }

    pub fn post_binding_logout(&self) -> ConfigResult<bool> {
        self.reader.read(&POST_BINDING_LOGOUT)
    }

    pub fn force_authn(&self) -> ConfigResult<bool> {
        self.reader.read(&FORCE_AUTHN)
    }

    pub fn want_authn_requests_signed(&self) -> ConfigResult<bool> {
        self.reader.read(&WANT_AUTHN_REQUESTS_SIGNED)
    }

    pub fn want_assertions_signed(&self) -> ConfigResult<bool> {
        self.reader.read(&WANT_ASSERTIONS_SIGNED)
    }

    pub fn want_assertions_encrypted(&self) -> ConfigResult<bool> {
        self.reader.read(&WANT_ASSERTIONS_ENCRYPTED)
    }

    pub fn validate_signature(&self) -> ConfigResult<bool> {
        self.reader.read(&VALIDATE_SIGNATURE)
    }

    pub fn backchannel_supported(&self) -> ConfigResult<bool> {
        self.reader.read(&BACKCHANNEL_SUPPORTED)
    }
}

impl ProviderConfigView for SamlProviderConfig {
    fn reader(&self) -> &ConfigReader {
        &self.reader
    }

    fn settings(&self) -> Vec<SettingInfo> {
        saml_settings()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn view(raw: RawProviderConfig) -> SamlProviderConfig {
        SamlProviderConfig::new(ProviderTypeId::from("saml"), raw)
    }

    #[test]
    fn test_saml_defaults() {
        let saml = view(
            RawProviderConfig::for_type("saml")
                .with("singleSignOnServiceUrl", "https://idp.example.com/saml/sso"),
        );
        assert!(saml.validate().is_ok());
        assert_eq!(
            saml.name_id_policy_format().unwrap(),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent"
        );
        assert_eq!(saml.signature_algorithm().unwrap(), SignatureAlgorithm::RsaSha256);
        assert_eq!(saml.key_name_transformer().unwrap(), KeyNameTransformer::KeyId);
        assert!(!saml.force_authn().unwrap());
        assert!(!saml.want_assertions_signed().unwrap());
        assert!(saml.backchannel_supported().unwrap());
        assert_eq!(saml.single_logout_service_url().unwrap(), None);
        assert_eq!(saml.signing_certificate().unwrap(), None);
    }

    #[test]
    fn test_saml_stored_values() {
        let saml = view(
            RawProviderConfig::for_type("saml")
                .with("singleSignOnServiceUrl", "https://idp.example.com/saml/sso")
                .with("forceAuthn", "true")
                .with("postBindingResponse", "TRUE")
                .with("signatureAlgorithm", "RSA_SHA512")
                .with("xmlSignKeyInfoKeyNameTransformer", "CERT_SUBJECT"),
        );
        assert!(saml.force_authn().unwrap());
        assert!(saml.post_binding_response().unwrap());
        assert_eq!(saml.signature_algorithm().unwrap(), SignatureAlgorithm::RsaSha512);
        assert_eq!(saml.key_name_transformer().unwrap(), KeyNameTransformer::CertSubject);
    }

    #[test]
    fn test_saml_invalid_enum() {
        let saml = view(
            RawProviderConfig::for_type("saml")
                .with("singleSignOnServiceUrl", "https://idp.example.com/saml/sso")
                .with("signatureAlgorithm", "HMAC_SHA256"),
        );
        match saml.signature_algorithm() {
            Err(ConfigError::InvalidConfigValue { key, value, reason }) => {
                assert_eq!(key, "signatureAlgorithm");
                assert_eq!(value, "HMAC_SHA256");
                assert!(reason.contains("RSA_SHA256"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(saml.validate().is_err());
    }

    #[test]
    fn test_saml_requires_sso_url() {
        let saml = view(RawProviderConfig::for_type("saml"));
        assert!(matches!(
            saml.single_sign_on_service_url(),
            Err(ConfigError::MissingRequiredConfig { key }) if key == "singleSignOnServiceUrl"
        ));
    }

    #[test]
    fn test_defaults_parse() {
        for info in saml_settings() {
            if let Some(default) = info.default_value() {
                assert!(info.check(default).is_ok(), "default of {} does not parse", info.key);
            }
        }
    }
}
