//! Source rewrite error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a rewrite job
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    Decoding { path: PathBuf },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unknown rewrite job: {name}")]
    UnknownJob { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message() {
        let source = regex::Regex::new("await pool\\.query(").unwrap_err();
        let err = RewriteError::InvalidPattern {
            pattern: "await pool\\.query(".to_string(),
            source,
        };

        let msg = err.to_string();
        assert!(msg.contains("await pool\\.query("));
    }

    #[test]
    fn test_unknown_job_message() {
        let err = RewriteError::UnknownJob {
            name: "column-names".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown rewrite job: column-names");
    }
}
