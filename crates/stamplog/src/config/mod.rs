//! Configuration for the logging initializer
//!
//! `LoggingConfig` carries every option the initializer recognises and can
//! be loaded from a YAML file.

mod error;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use file::{
    LoggingConfig, DEFAULT_DIR_NAME, DEFAULT_FALLBACK_DIR, DEFAULT_FILE_NAME_PATTERN,
    DEFAULT_LAST_RESORT_DIR,
};
