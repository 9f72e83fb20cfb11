//! Logging abstractions for runtime-agnostic logging
//!
//! The broker embedding this crate decides where log lines go by supplying
//! a `Logger`; the resolver defaults to `NoOpLogger`.

mod traits;
mod noop;
mod console;

pub use traits::{LogLevel, Logger, SharedLogger};
pub use noop::{MemoryLogger, NoOpLogger};
pub use console::ConsoleLogger;
