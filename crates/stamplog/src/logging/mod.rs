//! Logging: sinks, line format and initialization

mod traits;
mod format;
mod noop;
mod console;
mod file_logger;
mod sink;
mod init;

pub use traits::{
    LogLevel, Logger, LoggerExt, NamedLogger, Record, SharedLogger, MIN_LEVEL,
};
pub use format::{LogFormat, DEFAULT_TEMPLATE, TIMESTAMP_FORMAT};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use file_logger::FileLogger;
pub use sink::{DirCandidate, DirChain, FsLogDirs, LogDirs, SinkFailure, SinkStage};
pub use init::{global, init_global, init_logging, init_logging_with, LoggerHandle, Sink};
