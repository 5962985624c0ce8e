//! Logging initialization
//!
//! [`init_logging`] resolves a log directory through the fallback chain,
//! opens a timestamped log file and returns a [`LoggerHandle`] for the
//! chosen sink. When no file can be opened the handle writes to the
//! console. Nothing here returns an error: failures are recovered and
//! reported through [`LoggerHandle::failures`].
//!
//! ```no_run
//! use stamplog::config::LoggingConfig;
//! use stamplog::logging::{init_logging, LoggerExt};
//!
//! let handle = init_logging(&LoggingConfig::default());
//! handle.info("service started");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use once_cell::sync::OnceCell;

use super::console::ConsoleLogger;
use super::file_logger::FileLogger;
use super::sink::{DirChain, FsLogDirs, LogDirs, SinkFailure, SinkStage};
use super::traits::{LogLevel, Logger, NamedLogger, Record, SharedLogger};
use crate::config::LoggingConfig;

/// The sink a handle ended up writing to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    File(PathBuf),
    Console,
}

/// Result of logging initialization
///
/// The handle is itself a [`Logger`] writing under the configured logger
/// name. Pass it (or a [`named`](LoggerHandle::named) view) to the
/// components that log.
#[derive(Clone)]
pub struct LoggerHandle {
    name: String,
    logger: SharedLogger,
    sink: Sink,
    failures: Vec<SinkFailure>,
}

impl LoggerHandle {
    /// The underlying sink logger
    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Which sink was chosen
    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Path of the log file, if logging to a file
    pub fn log_path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::File(path) => Some(path),
            Sink::Console => None,
        }
    }

    /// Failures recovered while choosing the sink, in order
    pub fn failures(&self) -> &[SinkFailure] {
        &self.failures
    }

    /// Whether any candidate had to be skipped
    pub fn is_fallback(&self) -> bool {
        !self.failures.is_empty()
    }

    /// A view of this handle writing under another logger name
    pub fn named(&self, name: impl Into<String>) -> NamedLogger {
        NamedLogger::new(name, self.logger.clone())
    }
}

impl Logger for LoggerHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.logger.enabled(level)
    }

    fn log(&self, record: &Record<'_>) {
        self.logger.log(record);
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.name)
            .field("sink", &self.sink)
            .field("failures", &self.failures)
            .finish()
    }
}

/// Initialize logging for `config` on the local filesystem
pub fn init_logging(config: &LoggingConfig) -> LoggerHandle {
    init_logging_with(config, &FsLogDirs, Local::now())
}

/// Initialize logging with an explicit directory implementation and clock
pub fn init_logging_with(
    config: &LoggingConfig,
    dirs: &dyn LogDirs,
    now: DateTime<Local>,
) -> LoggerHandle {
    let mut failures = Vec::new();
    let format = config.log_format();

    let dir = DirChain::from_config(config).resolve(dirs, &mut failures);
    let file = dir.map(|dir| dir.join(config.file_name_at(&now)));

    let (logger, sink): (SharedLogger, Sink) = match file {
        Some(path) => match FileLogger::open(&path, format.clone()) {
            Ok(logger) => (Arc::new(logger), Sink::File(path)),
            Err(e) => {
                failures.push(SinkFailure {
                    stage: SinkStage::OpenFile,
                    path,
                    kind: e.kind(),
                });
                (Arc::new(ConsoleLogger::with_format(format)), Sink::Console)
            }
        },
        None => (Arc::new(ConsoleLogger::with_format(format)), Sink::Console),
    };

    LoggerHandle {
        name: config.logger_name.clone(),
        logger,
        sink,
        failures,
    }
}

static GLOBAL: OnceCell<LoggerHandle> = OnceCell::new();

/// Initialize the process-wide handle once
///
/// The first call wins. Later calls ignore `config` and return the
/// installed handle.
pub fn init_global(config: &LoggingConfig) -> &'static LoggerHandle {
    GLOBAL.get_or_init(|| init_logging(config))
}

/// The process-wide handle, if [`init_global`] has run
pub fn global() -> Option<&'static LoggerHandle> {
    GLOBAL.get()
}
