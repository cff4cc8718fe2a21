//! `scriptree externalize`: move every script out of the container.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use scriptree_sync::LOADER_NAME;

/// Arguments for `scriptree externalize`.
#[derive(Args, Debug)]
pub struct ExternalizeArgs {}

impl ExternalizeArgs {
    pub fn run(self, project: &Path) -> Result<()> {
        let sync = super::open(project)?;
        let report = sync.externalize().context("externalize failed")?;

        if let Some(backup) = &report.backup {
            println!("Backed up container to {}", backup.display());
        }
        super::print_writes(&report.export.writes, false);
        println!(
            "{} container now holds only '{LOADER_NAME}'; edit scripts under {}",
            "✓".green(),
            sync.scripts_root().display()
        );
        Ok(())
    }
}
