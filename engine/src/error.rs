use std::{io, path::PathBuf};

use thiserror::Error;

/// A single source file that could not be read as a monster record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("combined record is missing `_file`")]
    MissingFileRef,
}

/// Batch-level failures of the build commands. Per-file problems never show up
/// here; they are logged and recovered with fallback naming.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read record directory {}: {source}", .path.display())]
    DirUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The combined file or index could not be loaded at session start.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
