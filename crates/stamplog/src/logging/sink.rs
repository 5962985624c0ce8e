//! Ordered log directory candidates with fallback behavior

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::LoggingConfig;

/// Directory creation used while resolving the log directory
///
/// `FsLogDirs` is the real implementation. Tests substitute one that
/// fails on demand.
pub trait LogDirs: Send + Sync {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Creates directories on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLogDirs;

impl LogDirs for FsLogDirs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}

/// Step of the initializer a failure was recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStage {
    CreateDir,
    OpenFile,
}

/// A recovered failure of one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    pub stage: SinkStage,
    pub path: PathBuf,
    pub kind: io::ErrorKind,
}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            SinkStage::CreateDir => "create directory",
            SinkStage::OpenFile => "open log file",
        };
        write!(f, "failed to {} {}: {:?}", stage, self.path.display(), self.kind)
    }
}

/// One candidate log directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirCandidate {
    pub path: PathBuf,
    /// Create the directory (and parents) before use
    pub create: bool,
    /// Only try this candidate when the previous failure had this kind
    pub only_after: Option<io::ErrorKind>,
}

impl DirCandidate {
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create: true,
            only_after: None,
        }
    }

    pub fn existing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create: false,
            only_after: None,
        }
    }

    pub fn only_after(mut self, kind: io::ErrorKind) -> Self {
        self.only_after = Some(kind);
        self
    }

    fn applies(&self, previous: Option<io::ErrorKind>) -> bool {
        match self.only_after {
            None => true,
            Some(kind) => previous == Some(kind),
        }
    }
}

/// Log directory candidates tried in order; the first usable one wins
///
/// The default chain built from a [`LoggingConfig`] is:
///
/// 1. `<base_dir>/<dir_name>`, created
/// 2. `fallback_dir`, created, only if (1) was denied permission
/// 3. `last_resort_dir`, used as is
#[derive(Debug, Clone)]
pub struct DirChain {
    candidates: Vec<DirCandidate>,
}

impl DirChain {
    /// Create a chain from explicit candidates
    pub fn new(candidates: Vec<DirCandidate>) -> Self {
        Self { candidates }
    }

    /// The default chain for `config`
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(vec![
            DirCandidate::created(config.preferred_dir()),
            DirCandidate::created(&config.fallback_dir)
                .only_after(io::ErrorKind::PermissionDenied),
            DirCandidate::existing(&config.last_resort_dir),
        ])
    }

    /// Get the candidates in this chain
    pub fn candidates(&self) -> &[DirCandidate] {
        &self.candidates
    }

    /// Return the first usable directory, recording every failure
    ///
    /// Returns `None` only if every candidate required creation and all of
    /// them failed.
    pub fn resolve(&self, dirs: &dyn LogDirs, failures: &mut Vec<SinkFailure>) -> Option<PathBuf> {
        let mut previous: Option<io::ErrorKind> = None;
        for candidate in &self.candidates {
            if !candidate.applies(previous) {
                continue;
            }
            if !candidate.create {
                return Some(candidate.path.clone());
            }
            match dirs.create_dir_all(&candidate.path) {
                Ok(()) => return Some(candidate.path.clone()),
                Err(e) => {
                    previous = Some(e.kind());
                    failures.push(SinkFailure {
                        stage: SinkStage::CreateDir,
                        path: candidate.path.clone(),
                        kind: e.kind(),
                    });
                }
            }
        }
        None
    }
}
