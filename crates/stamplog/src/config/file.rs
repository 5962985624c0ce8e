//! Logging configuration, optionally loaded from a YAML file

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::logging::LogFormat;
use crate::logging::DEFAULT_TEMPLATE;

/// Name of the log directory created under the base directory
pub const DEFAULT_DIR_NAME: &str = "logs";

/// Directory tried when the base directory is not writable
pub const DEFAULT_FALLBACK_DIR: &str = "/tmp/logs";

/// Directory used as is when every other candidate failed
pub const DEFAULT_LAST_RESORT_DIR: &str = "/tmp";

/// `strftime` pattern of the log file stem
pub const DEFAULT_FILE_NAME_PATTERN: &str = "%m_%d_%Y_%H_%M_%S";

/// Options recognised by the logging initializer
///
/// Every field has a default, so an empty YAML document is valid:
///
/// ```
/// use stamplog::config::LoggingConfig;
///
/// let config = LoggingConfig::from_yaml_str("dir_name: app-logs").unwrap();
/// assert_eq!(config.dir_name, "app-logs");
/// assert_eq!(config.fallback_dir.to_str(), Some("/tmp/logs"));
/// ```
///
/// There is no level option: the minimum level is always INFO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory the log directory is created in (current directory if unset)
    pub base_dir: Option<PathBuf>,
    /// Log directory name under `base_dir`
    pub dir_name: String,
    /// Directory created when `base_dir` denies permission
    pub fallback_dir: PathBuf,
    /// Directory used without creation when everything else failed
    pub last_resort_dir: PathBuf,
    /// `strftime` pattern for the file stem; `.log` is appended
    pub file_name_pattern: String,
    /// Line template, see [`LogFormat`]
    pub format: String,
    /// Name written into every record
    pub logger_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            dir_name: DEFAULT_DIR_NAME.to_string(),
            fallback_dir: PathBuf::from(DEFAULT_FALLBACK_DIR),
            last_resort_dir: PathBuf::from(DEFAULT_LAST_RESORT_DIR),
            file_name_pattern: DEFAULT_FILE_NAME_PATTERN.to_string(),
            format: DEFAULT_TEMPLATE.to_string(),
            logger_name: "root".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from a YAML file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(ConfigError::from)
    }

    /// Set the base directory
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Set the permission-denied fallback directory
    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback_dir = dir.into();
        self
    }

    /// Set the last-resort directory
    pub fn with_last_resort_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.last_resort_dir = dir.into();
        self
    }

    /// Set the logger name
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    /// Resolved base directory
    pub fn base_dir(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// `<base_dir>/<dir_name>`
    pub fn preferred_dir(&self) -> PathBuf {
        self.base_dir().join(&self.dir_name)
    }

    /// Log file name for the given time
    ///
    /// An invalid `file_name_pattern` falls back to the default pattern.
    /// Path separators produced by the pattern (`%D`, `%F`, ...) become `_`
    /// so the file always lands directly in the log directory.
    pub fn file_name_at(&self, now: &DateTime<Local>) -> String {
        let mut stem = String::new();
        if write!(stem, "{}", now.format(&self.file_name_pattern)).is_err() {
            stem.clear();
            let _ = write!(stem, "{}", now.format(DEFAULT_FILE_NAME_PATTERN));
        }
        let stem: String = stem
            .chars()
            .map(|c| if c == '/' || c == std::path::MAIN_SEPARATOR { '_' } else { c })
            .collect();
        format!("{}.log", stem)
    }

    /// Line format built from `format`
    pub fn log_format(&self) -> LogFormat {
        LogFormat::new(self.format.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.dir_name, "logs");
        assert_eq!(config.fallback_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.last_resort_dir, PathBuf::from("/tmp"));
        assert_eq!(config.logger_name, "root");
        assert_eq!(config.log_format().template(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_preferred_dir_uses_current_dir() {
        let config = LoggingConfig::default();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.preferred_dir(), cwd.join("logs"));

        let config = config.with_base_dir("/srv/app");
        assert_eq!(config.preferred_dir(), PathBuf::from("/srv/app/logs"));
    }

    #[test]
    fn test_file_name_pattern() {
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        let config = LoggingConfig::default();
        assert_eq!(config.file_name_at(&now), "03_07_2026_09_05_01.log");
    }

    #[test]
    fn test_invalid_file_name_pattern_falls_back() {
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        let config = LoggingConfig {
            file_name_pattern: "%Q".to_string(),
            ..Default::default()
        };
        assert_eq!(config.file_name_at(&now), "03_07_2026_09_05_01.log");
    }

    #[test]
    fn test_file_name_pattern_with_separator() {
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        let config = LoggingConfig {
            file_name_pattern: "%D".to_string(),
            ..Default::default()
        };
        let name = config.file_name_at(&now);
        assert_eq!(name, "03_07_26.log");
        assert_eq!(Path::new(&name).components().count(), 1);
    }

    #[test]
    fn test_yaml_partial() {
        let config = LoggingConfig::from_yaml_str(
            "base_dir: /var/lib/app\nformat: \"{level} {message}\"\n",
        )
        .unwrap();
        assert_eq!(config.base_dir, Some(PathBuf::from("/var/lib/app")));
        assert_eq!(config.format, "{level} {message}");
        assert_eq!(config.dir_name, "logs");

        assert_eq!(LoggingConfig::from_yaml_str("").unwrap(), LoggingConfig::default());
    }

    #[test]
    fn test_yaml_invalid() {
        let err = LoggingConfig::from_yaml_str("dir_name: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logging.yaml");

        // Missing file yields defaults
        assert_eq!(LoggingConfig::load(&path).unwrap(), LoggingConfig::default());

        let config = LoggingConfig::default().with_logger_name("worker");
        fs::write(&path, config.to_yaml().unwrap()).unwrap();
        assert_eq!(LoggingConfig::load(&path).unwrap(), config);
    }
}
