//! Logger trait definition

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Local};

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

/// Records below this level are dropped by every sink.
pub const MIN_LEVEL: LogLevel = LogLevel::Info;

impl LogLevel {
    /// Name written into the log line
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log record as handed to a [`Logger`]
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub level: LogLevel,
    /// Logger name (`root` unless a named view is used)
    pub name: &'a str,
    pub file: &'a str,
    pub line: u32,
    pub timestamp: DateTime<Local>,
    pub message: &'a str,
}

impl<'a> Record<'a> {
    /// Create a record stamped with the current local time
    pub fn new(
        level: LogLevel,
        name: &'a str,
        location: &'a Location<'a>,
        message: &'a str,
    ) -> Self {
        Self {
            level,
            name,
            file: location.file(),
            line: location.line(),
            timestamp: Local::now(),
            message,
        }
    }
}

/// Logger abstraction
///
/// Implementations:
/// - `NoOpLogger`: Silent logger for testing
/// - `ConsoleLogger`: Formatted lines on stderr
/// - `FileLogger`: Formatted lines appended to a log file
/// - `NamedLogger`: Forwards to another logger under a different name
pub trait Logger: Send + Sync {
    /// Name stamped on records created through [`LoggerExt`]
    fn name(&self) -> &str {
        "root"
    }

    /// Whether records at `level` are written
    fn enabled(&self, level: LogLevel) -> bool {
        level >= MIN_LEVEL
    }

    /// Write a record. Implementations must drop records that are not
    /// [`enabled`](Logger::enabled).
    fn log(&self, record: &Record<'_>);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Extension trait for logging at the caller's line
///
/// Every method is `#[track_caller]`, so the record carries the file and
/// line of the call site.
pub trait LoggerExt: Logger {
    #[track_caller]
    fn log_at(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let record = Record::new(level, self.name(), Location::caller(), message);
        self.log(&record);
    }

    /// Log a debug message
    #[track_caller]
    fn debug(&self, message: &str) {
        self.log_at(LogLevel::Debug, message);
    }

    /// Log an info message
    #[track_caller]
    fn info(&self, message: &str) {
        self.log_at(LogLevel::Info, message);
    }

    /// Log a warning message
    #[track_caller]
    fn warn(&self, message: &str) {
        self.log_at(LogLevel::Warn, message);
    }

    /// Log an error message
    #[track_caller]
    fn error(&self, message: &str) {
        self.log_at(LogLevel::Error, message);
    }

    /// Log an info message with format arguments
    #[track_caller]
    fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_at(LogLevel::Info, &args.to_string());
    }

    /// Log a warning message with format arguments
    #[track_caller]
    fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_at(LogLevel::Warn, &args.to_string());
    }

    /// Log an error message with format arguments
    #[track_caller]
    fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_at(LogLevel::Error, &args.to_string());
    }
}

// Implement LoggerExt for all Logger implementations
impl<T: Logger + ?Sized> LoggerExt for T {}

/// A logger view that stamps its own name on records
///
/// ```
/// use std::sync::Arc;
/// use stamplog::logging::{LoggerExt, NamedLogger, NoOpLogger};
///
/// let logger = NamedLogger::new("ingest", Arc::new(NoOpLogger::new()));
/// logger.info("started");
/// ```
#[derive(Clone)]
pub struct NamedLogger {
    name: String,
    inner: SharedLogger,
}

impl NamedLogger {
    pub fn new(name: impl Into<String>, inner: SharedLogger) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

impl Logger for NamedLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.inner.enabled(level)
    }

    fn log(&self, record: &Record<'_>) {
        self.inner.log(record);
    }
}

impl fmt::Debug for NamedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedLogger")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Collects formatted-free records for assertions
    #[derive(Default)]
    pub(crate) struct CaptureLogger {
        pub(crate) records: Mutex<Vec<(LogLevel, String, u32, String)>>,
    }

    impl Logger for CaptureLogger {
        fn log(&self, record: &Record<'_>) {
            if !self.enabled(record.level) {
                return;
            }
            self.records.lock().unwrap().push((
                record.level,
                record.name.to_string(),
                record.line,
                record.message.to_string(),
            ));
        }
    }

    #[test]
    fn test_log_levels() {
        assert!(LogLevel::Debug > LogLevel::Trace);
        assert!(LogLevel::Info > LogLevel::Debug);
        assert!(LogLevel::Warn > LogLevel::Info);
        assert!(LogLevel::Error > LogLevel::Warn);
        assert_eq!(LogLevel::Warn.to_string(), "WARNING");
    }

    #[test]
    fn test_below_min_level_dropped() {
        let logger = CaptureLogger::default();
        logger.debug("hidden");
        logger.info("shown");
        let records = logger.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].3, "shown");
    }

    #[test]
    fn test_record_carries_caller_line() {
        let logger = CaptureLogger::default();
        let line = line!() + 1;
        logger.warn("here");
        let records = logger.records.lock().unwrap();
        assert_eq!(records[0].0, LogLevel::Warn);
        assert_eq!(records[0].2, line);
        assert_eq!(records[0].1, "root");
    }

    #[test]
    fn test_named_logger() {
        let capture = Arc::new(CaptureLogger::default());
        let named = NamedLogger::new("ingest", capture.clone());
        named.error_fmt(format_args!("failed {} rows", 3));
        let records = capture.records.lock().unwrap();
        assert_eq!(records[0].1, "ingest");
        assert_eq!(records[0].3, "failed 3 rows");
    }
}
