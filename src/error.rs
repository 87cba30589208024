use std::path::PathBuf;
use thiserror::Error;

/// Failures the file manager recovers from locally.
///
/// None of these terminate the session: the manager logs them, reports them
/// through the user interface and falls back to an empty result.
#[derive(Debug, Error)]
pub enum FmError {
    #[error("cannot list {}: {source}", path.display())]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid index {input:?}, expected a comma separated list of numbers")]
    Parse { input: String },

    #[error("index {index} out of range ({len} entries)")]
    Index { index: isize, len: usize },

    #[error("cannot open file {name}")]
    NotADirectory { name: String },

    #[error("{op} failed for {}: {source}", path.display())]
    Operation {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("trash failed for {}: {message}", path.display())]
    Trash { path: PathBuf, message: String },

    #[error("invalid source path {}", path.display())]
    InvalidSource { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, FmError>;

impl FmError {
    pub fn operation(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FmError::Operation {
            op,
            path: path.into(),
            source,
        }
    }
}
