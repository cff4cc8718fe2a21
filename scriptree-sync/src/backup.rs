//! Timestamped container backups.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{io_err, SyncError};

/// Backup path for `container` taken at `at`: `<dir>/<stem>_<YYYYmmdd_HHMMSS>.<ext>`.
///
/// A numeric suffix is appended when two backups land in the same second.
pub fn backup_path(dir: &Path, container: &Path, at: DateTime<Local>) -> PathBuf {
    let stem = container
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "container".to_string());
    let ext = container
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stamp = at.format("%Y%m%d_%H%M%S");

    let first = dir.join(format!("{stem}_{stamp}{ext}"));
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|i| dir.join(format!("{stem}_{stamp}-{i}{ext}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Copy `container` into `dir` under a timestamped name.
///
/// Returns `None` without touching the disk if the container does not exist.
pub fn backup_container(dir: &Path, container: &Path) -> Result<Option<PathBuf>, SyncError> {
    if !container.exists() {
        tracing::debug!("no container at {}; nothing to back up", container.display());
        return Ok(None);
    }
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    let target = backup_path(dir, container, Local::now());
    std::fs::copy(container, &target).map_err(|e| io_err(&target, e))?;
    tracing::info!("backed up {} to {}", container.display(), target.display());
    Ok(Some(target))
}
