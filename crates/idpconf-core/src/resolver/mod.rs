//! Provider configuration resolution
//!
//! Single entry point turning a provider instance id into a typed
//! configuration view: store lookup, provider type lookup, view construction.

mod config_resolver;

pub use config_resolver::ConfigResolver;
