//! Error types for scriptree-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration and container operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The script container did not exist at the expected path.
    #[error("script container not found at {path}")]
    ContainerNotFound { path: PathBuf },
}
