//! Error types for scriptree-sync.

use std::path::PathBuf;

use thiserror::Error;

use scriptree_core::CoreError;

use crate::tree::TreeError;

/// All errors that abort a sync operation.
///
/// Recoverable conditions (a missing script file, a folder without a
/// manifest) never surface here; they are logged and collected in the
/// operation's report instead.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from configuration or the container store.
    #[error("container error: {0}")]
    Core(#[from] CoreError),

    /// The export tree was built inconsistently.
    #[error("export tree error: {0}")]
    Tree(#[from] TreeError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project is not in an editable state.
    #[error("project is not editable: {reason}")]
    NotEditable { reason: String },

    /// The container holds at most one record.
    #[error("nothing to export: the container holds at most one script")]
    NothingToExport,

    /// The manifests reference nothing.
    #[error("nothing to import: the manifests list no scripts")]
    NothingToImport,
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
