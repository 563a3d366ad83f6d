//! Error types for conversion runs

use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that abort the conversion of a file
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Reading the source or writing the output failed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not UTF-8 text, so it cannot be a LightBurn export
    #[error(
        "{} is not UTF-8 text (invalid byte at offset {})",
        path.display(),
        source.utf8_error().valid_up_to()
    )]
    NotText {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A laser power directive carried a value that is not a usable number
    #[error("failed to parse laser power on line {line}: {text:?}")]
    InvalidPower { line: usize, text: String },

    /// Power configuration violates its invariants
    #[error("invalid power configuration: {0}")]
    InvalidConfig(String),

    /// Directory traversal failed during discovery
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Discovery pattern is not a valid glob
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl ConvertError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
