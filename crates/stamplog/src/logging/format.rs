//! Line format shared by every sink

use super::traits::Record;

/// Default line template
pub const DEFAULT_TEMPLATE: &str = "[ {timestamp} ] {line} {name} - {level} - {message}";

/// Timestamp layout inside a log line (`2026-10-17 14:03:59,123`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// A line template with `{timestamp}`, `{line}`, `{name}`, `{level}` and
/// `{message}` placeholders
///
/// Anything else between braces is written verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormat {
    template: String,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl LogFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a record into a single line (no trailing newline)
    pub fn render(&self, record: &Record<'_>) -> String {
        let mut out = String::with_capacity(self.template.len() + record.message.len() + 32);
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start..];
            let Some(end) = after.find('}') else {
                // Unterminated brace, keep the tail as is
                out.push_str(after);
                return out;
            };
            // A stray `{` before the real placeholder is literal text
            let open = after[..end].rfind('{').unwrap_or(0);
            out.push_str(&after[..open]);
            let key = &after[open + 1..end];
            match key {
                "timestamp" => out.push_str(&record.timestamp.format(TIMESTAMP_FORMAT).to_string()),
                "line" => out.push_str(&record.line.to_string()),
                "name" => out.push_str(record.name),
                "level" => out.push_str(record.level.as_str()),
                "message" => out.push_str(record.message),
                _ => out.push_str(&after[open..=end]),
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use chrono::{Local, TimeZone};

    fn record(message: &str) -> Record<'_> {
        Record {
            level: LogLevel::Info,
            name: "root",
            file: "src/main.rs",
            line: 42,
            timestamp: Local.with_ymd_and_hms(2026, 10, 17, 14, 3, 59).unwrap(),
            message,
        }
    }

    #[test]
    fn test_default_format() {
        let line = LogFormat::default().render(&record("ready"));
        assert_eq!(line, "[ 2026-10-17 14:03:59,000 ] 42 root - INFO - ready");
    }

    #[test]
    fn test_custom_template() {
        let format = LogFormat::new("{level}:{name}:{line} {message}");
        assert_eq!(format.render(&record("x")), "INFO:root:42 x");
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        let format = LogFormat::new("{pid} {message} {");
        assert_eq!(format.render(&record("x")), "{pid} x {");
    }

    #[test]
    fn test_stray_brace_before_placeholder() {
        let format = LogFormat::new("{a{message} {{level}}");
        assert_eq!(format.render(&record("x")), "{ax {INFO}");
    }

    #[test]
    fn test_braces_in_message_not_expanded() {
        let format = LogFormat::default();
        let line = format.render(&record("{level}"));
        assert!(line.ends_with("- INFO - {level}"));
    }
}
