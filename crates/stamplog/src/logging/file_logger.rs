//! File-backed logger
//!
//! Appends one formatted line per record to a log file. Writes are
//! serialised through a mutex and flushed per record so a crash loses at
//! most the record being written.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::format::LogFormat;
use super::traits::{Logger, Record};

/// A logger appending to a single file
#[derive(Debug)]
pub struct FileLogger {
    path: PathBuf,
    file: Mutex<File>,
    format: LogFormat,
}

impl FileLogger {
    /// Open (or create) `path` in append mode
    pub fn open(path: impl Into<PathBuf>, format: LogFormat) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
            format,
        })
    }

    /// Get the path to the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        // A poisoned lock means another writer panicked mid-record; drop ours.
        let Ok(mut file) = self.file.lock() else {
            return Ok(());
        };
        writeln!(file, "{}", line)?;
        file.flush()
    }
}

impl Logger for FileLogger {
    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.level) {
            return;
        }
        let line = self.format.render(record);
        let _ = self.write_line(&line);
    }
}
