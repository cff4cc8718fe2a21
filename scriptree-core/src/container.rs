//! Script container persistence.
//!
//! The container is the single store holding every record in load order.
//! [`ContainerStore`] is the seam the sync engine talks to; [`YamlContainer`]
//! is the bundled implementation, a YAML document saved with the same
//! `.tmp` + rename pattern as the project configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::FragmentRecord;

/// Current on-disk format version written by [`YamlContainer`].
pub const CONTAINER_VERSION: u32 = 1;

/// Read/write access to a script container keyed by path.
pub trait ContainerStore {
    /// Load every record in load order.
    fn load(&self, path: &Path) -> Result<Vec<FragmentRecord>, CoreError>;

    /// Replace the container's contents with `records`.
    fn save(&self, path: &Path, records: &[FragmentRecord]) -> Result<(), CoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ContainerFile {
    version: u32,
    #[serde(default)]
    records: Vec<FragmentRecord>,
}

/// Container stored as a YAML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlContainer;

impl ContainerStore for YamlContainer {
    fn load(&self, path: &Path) -> Result<Vec<FragmentRecord>, CoreError> {
        if !path.exists() {
            return Err(CoreError::ContainerNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let file: ContainerFile = serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(file.records)
    }

    fn save(&self, path: &Path, records: &[FragmentRecord]) -> Result<(), CoreError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = ContainerFile {
            version: CONTAINER_VERSION,
            records: records.to_vec(),
        };
        let yaml = serde_yaml::to_string(&file)?;
        let tmp_path = path.with_extension("yaml.tmp");
        std::fs::write(&tmp_path, yaml)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }
}
