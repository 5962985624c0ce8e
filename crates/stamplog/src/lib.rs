//! stamplog
//!
//! Two small building blocks for applications:
//!
//! - `logging`: initializes a timestamped log file under `./logs`, falling
//!   back to `/tmp/logs`, `/tmp` and finally the console, and hands back a
//!   logger handle to pass to components.
//! - `error`: an error type stamped with the file and line it was raised at.
//!
//! ```no_run
//! use stamplog::config::LoggingConfig;
//! use stamplog::error::ResultExt;
//! use stamplog::logging::{init_global, LoggerExt};
//!
//! let log = init_global(&LoggingConfig::default());
//!
//! if let Err(err) = std::fs::read_to_string("settings.toml").enrich() {
//!     log.error(&err.to_string());
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod panic_context;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, LoggingConfig};

pub use error::{EnrichedError, MessageStyle, ResultExt, SourceLocation};

pub use logging::{
    init_global, init_logging, ConsoleLogger, FileLogger, LogLevel, Logger, LoggerExt,
    LoggerHandle, NoOpLogger, Sink,
};

pub use panic_context::{catch, CapturedPanic, ContextError};
