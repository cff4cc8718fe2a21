//! `scriptree diff`: show unified diffs for what export would write.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use scriptree_sync::diff_export;

/// Arguments for `scriptree diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {}

impl DiffArgs {
    pub fn run(self, project: &Path) -> Result<()> {
        let sync = super::open(project)?;
        let diffs = diff_export(&sync).context("diff failed")?;

        if diffs.is_empty() {
            println!("No differences for '{}'.", sync.scripts_root().display());
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
