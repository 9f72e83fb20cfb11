//! Provider type registry
//!
//! Maps provider type ids to the factories that build their configuration
//! views. New provider types are added by registering a factory; neither the
//! resolver nor existing views change.

mod type_registry;
mod global;

pub use type_registry::{ProviderDescriptor, ProviderTypeRegistry, ViewFactory};
pub use global::{global, install_global};
