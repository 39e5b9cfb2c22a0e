use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, IndexError>;

/// Failures surfaced while producing index input. Normalizing, merging and
/// querying are total and never fail.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A document, document list or noise-word file could not be read.
    #[error("input unavailable: {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    pub fn input_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::InputUnavailable { path: path.into(), source }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            IndexError::InputUnavailable { path, .. } => path,
        }
    }
}
