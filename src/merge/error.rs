use std::path::PathBuf;

use crate::xml::parser::XmlError;

/// Failures that stop a merge.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// `execute` was called before a destination was set.
    #[error("No destination file is set. Use `into()` to set the result XML path")]
    NoDestination,

    /// The merged document could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-source problems. These are reported and the source is skipped;
/// they never abort a merge.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("File {0} could not be found")]
    Unavailable(PathBuf),

    #[error("File {path} can't be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {path} can't be loaded as XML: {source}")]
    Unparseable {
        path: PathBuf,
        #[source]
        source: XmlError,
    },
}

impl SourceError {
    pub fn path(&self) -> &PathBuf {
        match self {
            SourceError::Unavailable(path) => path,
            SourceError::Unreadable { path, .. } => path,
            SourceError::Unparseable { path, .. } => path,
        }
    }
}

pub type MergeResult<T> = Result<T, MergeError>;
