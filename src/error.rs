use std::path::PathBuf;

/// Failures of the persistent key-value store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store document could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures constructing a typing session
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("target text must not be empty")]
    EmptyTarget,
}
