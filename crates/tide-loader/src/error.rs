//! Loader Error Types

use std::path::PathBuf;
use thiserror::Error;
use tide_data::SchemaError;

/// Errors that can occur while loading a station file
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input path does not exist
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Underlying read failure
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read failure from a source with no path
    #[error("I/O error: {0}")]
    Read(#[source] std::io::Error),

    /// Malformed row or cell
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Header does not match the expected schema
    #[error("Invalid header: {0}")]
    Schema(#[from] SchemaError),
}

impl LoadError {
    pub(crate) fn parse(line: u64, message: impl Into<String>) -> Self {
        LoadError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => format!("expected {} fields to match the header, found {}", expected_len, len),
            _ => err.to_string(),
        };
        match err.into_kind() {
            csv::ErrorKind::Io(source) => LoadError::Read(source),
            _ => LoadError::parse(line, message),
        }
    }
}
