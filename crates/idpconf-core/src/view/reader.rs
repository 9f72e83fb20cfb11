//! Typed reads over one raw provider configuration

use crate::error::{ConfigError, ConfigResult};
use crate::types::{ProviderTypeId, RawProviderConfig};
use super::setting::{ConfigValue, Presence, Setting, SettingInfo};

/// Read-only access to one provider instance's raw configuration
///
/// Every view owns one reader. Reads never modify the configuration and
/// always give the same answer for the same configuration:
///
/// 1. absent or blank key: the declared default (`None` for optional settings,
///    `MissingRequiredConfig` for required ones)
/// 2. present key: the value parsed into the setting's shape, or
///    `InvalidConfigValue` naming the key, the raw value and the reason
#[derive(Debug, Clone)]
pub struct ConfigReader {
    provider_type: ProviderTypeId,
    raw: RawProviderConfig,
}

impl ConfigReader {
    pub fn new(provider_type: ProviderTypeId, raw: RawProviderConfig) -> Self {
        Self { provider_type, raw }
    }

    pub fn provider_type(&self) -> &ProviderTypeId {
        &self.provider_type
    }

    pub fn raw(&self) -> &RawProviderConfig {
        &self.raw
    }

    /// Read a setting that always produces a value
    pub fn read<T: ConfigValue>(&self, setting: &Setting<T>) -> ConfigResult<T> {
        self.read_opt(setting)?
            .ok_or_else(|| ConfigError::missing_required(setting.key()))
    }

    /// Read a setting, yielding `None` for an absent optional setting
    pub fn read_opt<T: ConfigValue>(&self, setting: &Setting<T>) -> ConfigResult<Option<T>> {
        let key = setting.key();
        match self.raw.get_non_blank(key) {
            Some(value) => T::parse_value(value)
                .map(Some)
                .map_err(|reason| ConfigError::invalid_value(key, value, reason)),
            None => match setting.presence() {
                Presence::Required => Err(ConfigError::missing_required(key)),
                Presence::Default(default) => T::parse_value(default)
                    .map(Some)
                    .map_err(|reason| ConfigError::invalid_value(key, default, reason)),
                Presence::Optional => Ok(None),
            },
        }
    }

    /// Whether a non-blank value is stored for `key`
    pub fn is_set(&self, key: &str) -> bool {
        self.raw.get_non_blank(key).is_some()
    }

    /// Raw value of any key, undeclared custom attributes included
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.raw.get(key)
    }

    /// Check one declared setting against the stored value
    pub fn check(&self, info: &SettingInfo) -> ConfigResult<()> {
        match self.raw.get_non_blank(info.key) {
            Some(value) => info
                .check(value)
                .map_err(|reason| ConfigError::invalid_value(info.key, value, reason)),
            None if info.is_required() => Err(ConfigError::missing_required(info.key)),
            None => Ok(()),
        }
    }
}
