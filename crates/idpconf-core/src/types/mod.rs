//! Core types shared by stores, views and the resolver

mod provider;

pub use provider::{ProviderTypeId, RawProviderConfig, is_sensitive_key, PROVIDER_TYPE_KEY};
