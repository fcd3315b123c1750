use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no object selected")]
    NoSelection,
    #[error("object {object:?} has no hair particle system")]
    NoHairData { object: String },
    #[error("failed to write {path:?}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write metadata: {0}")]
    SinkFailure(#[source] io::Error),
    #[error("invalid input {path:?}: {message}")]
    InvalidInput { path: PathBuf, message: String },
}

impl ExportError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::WriteFailure {
            path: path.into(),
            source,
        }
    }
}
