//! Declared configuration settings
//!
//! A `Setting<T>` names a raw key, the shape its value must parse into and
//! what happens when the key is absent or blank. Views expose one accessor
//! per setting and list their settings through `SettingInfo`, so every
//! default is part of a view's documented contract.

use std::fmt;
use std::marker::PhantomData;

use url::Url;

/// Shape a raw string value must parse into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Free text, returned verbatim
    Text,
    /// Absolute `http` or `https` URL
    Url,
    /// `true` or `false`, case-insensitive
    Boolean,
    /// One of a fixed set of values, matched exactly
    Enumeration(&'static [&'static str]),
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Text => write!(f, "string"),
            ValueShape::Url => write!(f, "URL"),
            ValueShape::Boolean => write!(f, "boolean"),
            ValueShape::Enumeration(values) => write!(f, "one of {}", values.join(", ")),
        }
    }
}

/// What an accessor returns when its key is absent or blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// No default; reading fails with `MissingRequiredConfig`
    Required,
    /// Raw default, parsed with the same rules as a stored value
    Default(&'static str),
    /// No default; reading yields `None`
    Optional,
}

/// A value that can be parsed from a raw configuration string
pub trait ConfigValue: Sized {
    /// Shape advertised for this value type
    fn shape() -> ValueShape;

    /// Parse a non-blank raw value, returning a human-readable reason on failure
    fn parse_value(raw: &str) -> Result<Self, String>;
}

impl ConfigValue for String {
    fn shape() -> ValueShape {
        ValueShape::Text
    }

    fn parse_value(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl ConfigValue for bool {
    fn shape() -> ValueShape {
        ValueShape::Boolean
    }

    fn parse_value(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err("expected true or false".to_string())
        }
    }
}

impl ConfigValue for Url {
    fn shape() -> ValueShape {
        ValueShape::Url
    }

    fn parse_value(raw: &str) -> Result<Self, String> {
        let url = Url::parse(raw.trim()).map_err(|e| format!("not a valid URL: {}", e))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!("unsupported URL scheme {:?}, expected http or https", other)),
        }
    }
}

/// Parse an enumeration value against its `(raw, value)` table
pub fn parse_enum<T: Copy>(raw: &str, table: &[(&'static str, T)]) -> Result<T, String> {
    let trimmed = raw.trim();
    table
        .iter()
        .find(|(name, _)| *name == trimmed)
        .map(|(_, value)| *value)
        .ok_or_else(|| {
            let names: Vec<&str> = table.iter().map(|(name, _)| *name).collect();
            format!("expected one of {}", names.join(", "))
        })
}

/// Type-erased description of a declared setting
#[derive(Clone, Copy)]
pub struct SettingInfo {
    pub key: &'static str,
    pub shape: ValueShape,
    pub presence: Presence,
    pub description: &'static str,
    check: fn(&str) -> Result<(), String>,
}

impl SettingInfo {
    /// Whether the setting has neither a default nor optional semantics
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// The documented default, if any
    pub fn default_value(&self) -> Option<&'static str> {
        match self.presence {
            Presence::Default(raw) => Some(raw),
            _ => None,
        }
    }

    /// Check that a non-blank raw value parses under this setting's shape
    pub fn check(&self, raw: &str) -> Result<(), String> {
        (self.check)(raw)
    }
}

impl fmt::Debug for SettingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingInfo")
            .field("key", &self.key)
            .field("shape", &self.shape)
            .field("presence", &self.presence)
            .finish()
    }
}

fn check_value<T: ConfigValue>(raw: &str) -> Result<(), String> {
    T::parse_value(raw).map(|_| ())
}

/// A declared configuration setting of type `T`
pub struct Setting<T> {
    key: &'static str,
    presence: Presence,
    description: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> Setting<T> {
    /// A setting with no default
    pub const fn required(key: &'static str, description: &'static str) -> Self {
        Self::declare(key, Presence::Required, description)
    }

    /// A setting falling back to a raw default when absent or blank
    pub const fn with_default(key: &'static str, default: &'static str, description: &'static str) -> Self {
        Self::declare(key, Presence::Default(default), description)
    }

    /// A setting that reads as `None` when absent or blank
    pub const fn optional(key: &'static str, description: &'static str) -> Self {
        Self::declare(key, Presence::Optional, description)
    }

    const fn declare(key: &'static str, presence: Presence, description: &'static str) -> Self {
        Self {
            key,
            presence,
            description,
            _value: PhantomData,
        }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub const fn presence(&self) -> Presence {
        self.presence
    }
}

impl<T: ConfigValue> Setting<T> {
    /// Describe this setting
    pub fn info(&self) -> SettingInfo {
        SettingInfo {
            key: self.key,
            shape: T::shape(),
            presence: self.presence,
            description: self.description,
            check: check_value::<T>,
        }
    }
}

impl<T> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("key", &self.key)
            .field("presence", &self.presence)
            .finish()
    }
}
