//! Configuration store abstractions
//!
//! Supports multiple backends:
//! - `MemoryConfigStore`: In-memory
//! - `FileConfigStore`: YAML file-based

mod traits;
mod memory;
mod file;

pub use traits::ConfigStore;
pub use memory::MemoryConfigStore;
pub use file::{FileConfigStore, StoreFile};
