//! Console logger implementation

use std::io::Write;

use super::format::LogFormat;
use super::traits::{Logger, Record};

/// A logger that writes formatted lines to stderr
///
/// This is the last link of the fallback chain, used when no log file can
/// be opened.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger {
    format: LogFormat,
}

impl ConsoleLogger {
    /// Create a new console logger with the default line format
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a console logger with a custom line format
    pub fn with_format(format: LogFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &LogFormat {
        &self.format
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.level) {
            return;
        }
        let line = self.format.render(record);
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}
