//! No-op logger implementation

use super::traits::{LogLevel, Logger, Record};

/// A logger that does nothing
///
/// Useful for testing, or for code paths that take a logger but run
/// before logging has been initialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    /// Create a new no-op logger
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _record: &Record<'_>) {}
}
