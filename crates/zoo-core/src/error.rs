//! Error types for host-level zoo operations
//!
//! Rule evaluation itself never produces these: a failing analysis unit is
//! reported as a skipped outcome instead. Errors here come from reading files,
//! loading configuration, and building term tables.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZooError {
    /// Unreadable or invalid `.zoorc` file, or an unknown rule id in it
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Empty or duplicate terms
    #[error("Invalid term table: {message}")]
    TermTableError { message: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    GlobError { pattern: String, message: String },

    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of [`ZooError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    TermTable,
    Glob,
    Io,
}

impl ZooError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZooError::ConfigError { .. } => ErrorKind::Config,
            ZooError::TermTableError { .. } => ErrorKind::TermTable,
            ZooError::GlobError { .. } => ErrorKind::Glob,
            ZooError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Whether a run can skip the affected file and go on with the others
    ///
    /// Only I/O failures are local to one file; every other error makes the
    /// whole run meaningless.
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::Io
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn term_table_error(message: impl Into<String>) -> Self {
        Self::TermTableError {
            message: message.into(),
        }
    }

    pub fn glob_error(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GlobError {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// I/O failure on `path`
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for ZooError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(PathBuf::new(), err)
    }
}
