//! `scriptree setup`: create the scripts folder layout.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

/// Arguments for `scriptree setup`.
#[derive(Args, Debug)]
pub struct SetupArgs {}

impl SetupArgs {
    pub fn run(self, project: &Path) -> Result<()> {
        let sync = super::open(project)?;
        let report = sync.setup().context("setup failed")?;

        if report.created.is_empty() {
            println!("{} already set up at {}", "✓".green(), sync.scripts_root().display());
            return Ok(());
        }
        println!("{} set up {}", "✓".green(), sync.scripts_root().display());
        for path in &report.created {
            println!("  +  {}", path.display());
        }
        Ok(())
    }
}
