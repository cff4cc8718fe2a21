pub mod diff;
pub mod export;
pub mod externalize;
pub mod import;
pub mod load;
pub mod setup;

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use scriptree_sync::{ScriptSync, WriteResult};

/// Open the project at `project` with its configuration.
pub(crate) fn open(project: &Path) -> Result<ScriptSync> {
    ScriptSync::open(project)
        .with_context(|| format!("cannot open project at '{}'", project.display()))
}

/// Print per-file write outcomes, shared by `export` and `externalize`.
pub(crate) fn print_writes(writes: &[WriteResult], dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let changed = writes.iter().filter(|w| w.is_change()).count();
    println!(
        "{prefix}{} {} written, {} unchanged",
        "✓".green(),
        changed,
        writes.len() - changed
    );

    let mark = if dry_run { "~" } else { "✎" };
    for r in writes.iter().filter(|w| w.is_change()) {
        println!("  {mark}  {}", r.path().display());
    }
}

/// Print listed scripts that were not found on disk.
pub(crate) fn print_missing(missing: &[String], skipped_folders: &[String]) {
    for path in missing {
        println!("  {} missing: {path}", "!".yellow());
    }
    for folder in skipped_folders {
        println!("  {} folder without list file skipped: {folder}/", "!".yellow());
    }
}
