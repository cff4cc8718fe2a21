//! `scriptree import`: rebuild the container from the script files.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

/// Arguments for `scriptree import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Build the new container contents without saving them.
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    pub fn run(self, project: &Path) -> Result<()> {
        let sync = super::open(project)?;
        let report = sync.import(self.dry_run).context("import failed")?;

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        if let Some(backup) = &report.backup {
            println!("Backed up container to {}", backup.display());
        }
        println!(
            "{prefix}{} imported {} records into {}",
            "✓".green(),
            report.records.len(),
            sync.container_path().display()
        );
        super::print_missing(&report.missing, &report.skipped_folders);
        Ok(())
    }
}
