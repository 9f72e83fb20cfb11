//! Console logger implementation

use super::traits::{LogLevel, Logger};

/// A logger writing to the console
///
/// Debug and info go to stdout, warnings and errors to stderr. Records
/// below `min_level` are dropped.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Console logger with the `[idpconf]` prefix, logging info and above
    pub fn new() -> Self {
        Self {
            prefix: "[idpconf]".to_string(),
            min_level: LogLevel::Info,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_min_level(mut self, min_level: LogLevel) -> Self {
        self.min_level = min_level;
        self
    }

    /// Whether a record at `level` would be written
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Debug | LogLevel::Info => println!("{} {}: {}", self.prefix, level, message),
            LogLevel::Warn | LogLevel::Error => eprintln!("{} {}: {}", self.prefix, level, message),
        }
    }
}
