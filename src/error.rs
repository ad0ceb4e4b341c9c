//! Error types for the I/O edges of the game (config file, stats log).
//!
//! The simulation itself never fails; only loading and persisting can.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to read or parse a config file.
///
/// Callers normally fall back to defaults instead of surfacing this.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The text is not valid JSON.
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    /// Top-level JSON value is something other than an object.
    NotAnObject,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse {
                path: Some(path),
                source,
            } => write!(f, "invalid config JSON in {}: {}", path.display(), source),
            ConfigError::Parse { path: None, source } => {
                write!(f, "invalid config JSON: {}", source)
            }
            ConfigError::NotAnObject => write!(f, "config root must be a JSON object"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::NotAnObject => None,
        }
    }
}

/// Failure while appending to or reading the stats log.
#[derive(Debug)]
pub enum StatsError {
    /// Opening, writing or reading the backing file failed.
    Io(io::Error),
    /// A record could not be encoded.
    Encode(serde_json::Error),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Io(e) => write!(f, "stats store I/O failed: {}", e),
            StatsError::Encode(e) => write!(f, "stats record could not be encoded: {}", e),
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatsError::Io(e) => Some(e),
            StatsError::Encode(e) => Some(e),
        }
    }
}

impl From<io::Error> for StatsError {
    fn from(e: io::Error) -> Self {
        StatsError::Io(e)
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(e: serde_json::Error) -> Self {
        StatsError::Encode(e)
    }
}
