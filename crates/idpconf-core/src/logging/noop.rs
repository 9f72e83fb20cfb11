//! Silent and in-memory loggers

use parking_lot::Mutex;

use super::traits::{LogLevel, Logger};

/// A logger that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// A logger that keeps every record in memory
///
/// Lets embedding code and tests assert on what was logged.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records so far, oldest first
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records.lock().clone()
    }

    /// Messages logged at exactly `level`
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.records.lock().push((level, message.to_string()));
    }
}
