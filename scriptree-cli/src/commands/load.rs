//! `scriptree load`: walk the load order and read every script.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use scriptree_sync::LoadReport;

/// Arguments for `scriptree load`.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct LoadReportJson<'a> {
    scripts: Vec<LoadedScriptJson<'a>>,
    missing: &'a [String],
    skipped_folders: &'a [String],
}

#[derive(Serialize)]
struct LoadedScriptJson<'a> {
    name: &'a str,
    path: &'a str,
    lines: usize,
    bytes: usize,
}

impl LoadArgs {
    pub fn run(self, project: &Path) -> Result<()> {
        let sync = super::open(project)?;
        let report = sync.load().context("load failed")?;

        if self.json {
            return print_json(&report);
        }

        for (index, script) in report.scripts.iter().enumerate() {
            println!(
                "{:>4}  {}  {}",
                index + 1,
                script.path,
                format!("({} lines)", script.content.lines().count()).dimmed()
            );
        }
        super::print_missing(&report.missing, &report.skipped_folders);
        println!(
            "{} {} scripts loaded, {} missing",
            "✓".green(),
            report.scripts.len(),
            report.missing.len()
        );
        Ok(())
    }
}

fn print_json(report: &LoadReport) -> Result<()> {
    let json = LoadReportJson {
        scripts: report
            .scripts
            .iter()
            .map(|s| LoadedScriptJson {
                name: &s.name,
                path: &s.path,
                lines: s.content.lines().count(),
                bytes: s.content.len(),
            })
            .collect(),
        missing: &report.missing,
        skipped_folders: &report.skipped_folders,
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
