//! scriptree: edit a script container as a folder of plain files.
//!
//! # Usage
//!
//! ```text
//! scriptree [--project <dir>] setup
//! scriptree [--project <dir>] export [--dry-run]
//! scriptree [--project <dir>] externalize
//! scriptree [--project <dir>] load [--json]
//! scriptree [--project <dir>] import [--dry-run]
//! scriptree [--project <dir>] diff
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    diff::DiffArgs, export::ExportArgs, externalize::ExternalizeArgs, import::ImportArgs,
    load::LoadArgs, setup::SetupArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "scriptree",
    version,
    about = "Sync a script container with an editable folder of script files",
    long_about = None,
)]
struct Cli {
    /// Project root holding the container and the scripts folder.
    #[arg(long, short = 'C', global = true, default_value = ".")]
    project: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the scripts folder, backup folder and an empty root list.
    Setup(SetupArgs),

    /// Write every script of the container to the scripts folder.
    Export(ExportArgs),

    /// Back up and export the container, then leave only a loader record in it.
    Externalize(ExternalizeArgs),

    /// Read every listed script in load order without changing anything.
    Load(LoadArgs),

    /// Rebuild the container from the scripts folder.
    Import(ImportArgs),

    /// Show unified diff of what export would write.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let project = cli.project;
    match cli.command {
        Commands::Setup(args) => args.run(&project),
        Commands::Export(args) => args.run(&project),
        Commands::Externalize(args) => args.run(&project),
        Commands::Load(args) => args.run(&project),
        Commands::Import(args) => args.run(&project),
        Commands::Diff(args) => args.run(&project),
    }
}
