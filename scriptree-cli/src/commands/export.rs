//! `scriptree export`: write the container out as script files.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

/// Arguments for `scriptree export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    pub fn run(self, project: &Path) -> Result<()> {
        let sync = super::open(project)?;
        let report = sync.export(self.dry_run).context("export failed")?;

        println!(
            "Exported {} scripts to {} ({:?} grouping)",
            report.scripts,
            sync.scripts_root().display(),
            report.mode
        );
        if report.renamed > 0 {
            println!("  {} script names were made file-safe or unique", report.renamed);
        }
        super::print_writes(&report.writes, self.dry_run);
        Ok(())
    }
}
