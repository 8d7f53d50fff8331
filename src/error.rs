//! Error type shared by every stage of the histogram pipeline.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistogramError>;

#[derive(Debug, Error)]
pub enum HistogramError {
    #[error("no input arrays selected in {}", dir.display())]
    NoInputFiles { dir: PathBuf },

    #[error("shape mismatch in {}: expected {expected:?}, found {found:?}", path.display())]
    ShapeMismatch {
        path: PathBuf,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not contain a numeric array: {reason}", path.display())]
    UnexpectedInputType { path: PathBuf, reason: String },

    #[error("{channel} value {value} at ({row}, {col}) is outside [0, 1]")]
    ColorRange {
        channel: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },

    #[error("failed to read config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("failed to encode {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
}

impl HistogramError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
