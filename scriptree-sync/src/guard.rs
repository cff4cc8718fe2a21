//! Editable-project check run before every command.

use std::path::{Path, PathBuf};

use crate::error::SyncError;

/// Decides whether the project may be modified right now.
pub trait EditGuard {
    fn check(&self) -> Result<(), SyncError>;
}

/// Every project is editable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEditable;

impl EditGuard for AlwaysEditable {
    fn check(&self) -> Result<(), SyncError> {
        Ok(())
    }
}

/// Editable only while a marker file exists in the project root.
#[derive(Debug, Clone)]
pub struct MarkerFileGuard {
    marker: PathBuf,
}

impl MarkerFileGuard {
    pub fn new(project: &Path, marker: &str) -> Self {
        Self {
            marker: project.join(marker),
        }
    }
}

impl EditGuard for MarkerFileGuard {
    fn check(&self) -> Result<(), SyncError> {
        if self.marker.exists() {
            Ok(())
        } else {
            Err(SyncError::NotEditable {
                reason: format!("{} not found", self.marker.display()),
            })
        }
    }
}
