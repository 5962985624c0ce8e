//! Errors stamped with the location they were raised at
//!
//! An [`EnrichedError`] wraps an error together with the file and line it
//! was raised at and renders both into a single message. The location is
//! taken from the caller via `#[track_caller]`, so construct the error at
//! the raise site:
//!
//! ```
//! use stamplog::error::{EnrichedError, ResultExt};
//!
//! fn parse(input: &str) -> Result<u32, EnrichedError> {
//!     input.trim().parse::<u32>().enrich()
//! }
//!
//! let err = parse("x").unwrap_err();
//! assert!(err.to_string().starts_with("Error occured in python script name ["));
//! assert!(err.to_string().ends_with("error message[invalid digit found in string]"));
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Wording of the enriched message
///
/// `Legacy` reproduces the message existing log scrapers match on,
/// spelling included. `Corrected` fixes the wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageStyle {
    #[default]
    Legacy,
    Corrected,
}

impl MessageStyle {
    /// Render the message for `location` and `message`
    pub fn render(&self, location: &SourceLocation, message: &str) -> String {
        match self {
            MessageStyle::Legacy => format!(
                "Error occured in python script name [{}] line number [{}] error message[{}]",
                location.file, location.line, message
            ),
            MessageStyle::Corrected => format!(
                "Error occurred in source file [{}] line number [{}] error message[{}]",
                location.file, location.line, message
            ),
        }
    }
}

/// File and line an error was raised at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: String,
    line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Location of the caller
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// An error carrying the location it was raised at
///
/// The formatted message is computed once at construction and is what
/// `Display` writes. The wrapped error, if any, is kept as the source.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{formatted_message}")]
pub struct EnrichedError {
    original_message: String,
    source_location: SourceLocation,
    formatted_message: String,
    #[source]
    source: Option<Arc<dyn StdError + Send + Sync + 'static>>,
}

impl EnrichedError {
    /// Wrap `error`, stamped with the caller's location
    #[track_caller]
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::at(SourceLocation::caller(), error)
    }

    /// Create from a bare message, stamped with the caller's location
    #[track_caller]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::build(
            MessageStyle::default(),
            SourceLocation::caller(),
            message.into(),
            None,
        )
    }

    /// Wrap `error` at an explicit location
    pub fn at<E>(location: SourceLocation, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let message = error.to_string();
        Self::build(
            MessageStyle::default(),
            location,
            message,
            Some(Arc::new(error)),
        )
    }

    /// Create from a message at an explicit location with a chosen wording
    pub fn with_style(
        style: MessageStyle,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self::build(style, location, message.into(), None)
    }

    fn build(
        style: MessageStyle,
        location: SourceLocation,
        original_message: String,
        source: Option<Arc<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        let formatted_message = style.render(&location, &original_message);
        Self {
            original_message,
            source_location: location,
            formatted_message,
            source,
        }
    }

    /// Message of the wrapped error
    pub fn original_message(&self) -> &str {
        &self.original_message
    }

    /// Where the error was raised
    pub fn source_location(&self) -> &SourceLocation {
        &self.source_location
    }

    /// The full message, identical to the `Display` output
    pub fn formatted_message(&self) -> &str {
        &self.formatted_message
    }
}

/// Stamp the location of the `.enrich()` call on an error result
pub trait ResultExt<T> {
    fn enrich(self) -> Result<T, EnrichedError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[track_caller]
    fn enrich(self) -> Result<T, EnrichedError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(EnrichedError::new(error)),
        }
    }
}
