//! Template assembly error types

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while assembling a page template
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Input not found: {}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    Decoding {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssembleError {
    /// Classify a failure that happened while reading an input file
    pub fn from_read(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => AssembleError::InputNotFound { path, source },
            io::ErrorKind::InvalidData => AssembleError::Decoding { path, source },
            _ => AssembleError::InputUnreadable { path, source },
        }
    }

    /// Wrap a failure that happened while writing the output file
    pub fn from_write(path: &Path, source: io::Error) -> Self {
        AssembleError::OutputUnwritable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path of the file the error refers to
    pub fn path(&self) -> &Path {
        match self {
            AssembleError::InputNotFound { path, .. }
            | AssembleError::InputUnreadable { path, .. }
            | AssembleError::Decoding { path, .. }
            | AssembleError::OutputUnwritable { path, .. } => path,
        }
    }
}
