//! Dry-run unified diff support for `scriptree diff`.

use std::path::PathBuf;

use similar::TextDiff;

use scriptree_core::ContainerStore;

use crate::{engine::ScriptSync, writer::read_existing, SyncError};

/// A single planned file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Plan an export and compare every planned file with what is on disk.
///
/// Files that would not change are left out. No files are written.
pub fn diff_export<C: ContainerStore>(sync: &ScriptSync<C>) -> Result<Vec<FileDiff>, SyncError> {
    let plan = sync.plan_export()?;
    let root = sync.scripts_root();

    let mut diffs = Vec::new();
    for file in plan.files {
        let planned = normalize_line_endings(&file.content);
        let existing = read_existing(&file.path)?
            .map(|content| normalize_line_endings(&content))
            .unwrap_or_default();
        if existing == planned {
            continue;
        }

        let relative = file.path.strip_prefix(&root).unwrap_or(file.path.as_path());
        let old_header = format!("a/{}", relative.display());
        let new_header = format!("b/{}", relative.display());
        let unified = TextDiff::from_lines(&existing, &planned)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path: file.path,
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}
