//! Per-project configuration.
//!
//! # Storage layout
//!
//! ```text
//! <project>/
//!   scriptree.yaml          (optional; every field has a default)
//!   Data/Scripts.yaml       (container)
//!   Scripts/
//!     _List.rb              (root manifest)
//!     _Backups/
//!     <Folder>/_List.rb     (per-folder manifest)
//!     <Folder>/<Name>.rb
//! ```
//!
//! A missing `scriptree.yaml` is not an error: [`load_at`] falls back to
//! [`ProjectConfig::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// File name of the project configuration, relative to the project root.
pub const CONFIG_FILE: &str = "scriptree.yaml";

/// Line terminator written into manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Names and paths that make up a project's script layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Scripts root, relative to the project root.
    pub root_dir: PathBuf,
    /// Backup folder, relative to the scripts root.
    pub backup_dir: PathBuf,
    /// File name of every manifest.
    pub manifest_name: String,
    /// Extension of script files, without the dot.
    pub extension: String,
    /// Container path, relative to the project root.
    pub container: PathBuf,
    /// File that must exist in the project root for the project to count as
    /// editable. `None` disables the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_marker: Option<String>,
    pub line_ending: LineEnding,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("Scripts"),
            backup_dir: PathBuf::from("_Backups"),
            manifest_name: "_List.rb".to_string(),
            extension: "rb".to_string(),
            container: PathBuf::from("Data").join("Scripts.yaml"),
            project_marker: None,
            line_ending: LineEnding::Lf,
        }
    }
}

impl ProjectConfig {
    /// `<project>/<root_dir>`
    pub fn scripts_root(&self, project: &Path) -> PathBuf {
        project.join(&self.root_dir)
    }

    /// `<project>/<root_dir>/<backup_dir>`
    pub fn backup_root(&self, project: &Path) -> PathBuf {
        self.scripts_root(project).join(&self.backup_dir)
    }

    /// `<project>/<root_dir>/<manifest_name>`
    pub fn root_manifest(&self, project: &Path) -> PathBuf {
        self.scripts_root(project).join(&self.manifest_name)
    }

    /// `<project>/<container>`
    pub fn container_path(&self, project: &Path) -> PathBuf {
        project.join(&self.container)
    }

    /// `name` with the script extension appended.
    pub fn file_name(&self, name: &str) -> String {
        format!("{name}.{}", self.extension)
    }
}

/// `<project>/scriptree.yaml`: pure, no I/O.
pub fn config_path_at(project: &Path) -> PathBuf {
    project.join(CONFIG_FILE)
}

/// Load the configuration of the project rooted at `project`.
///
/// Returns defaults when the file is absent and `CoreError::Parse` (with
/// path + line context) if it is malformed.
pub fn load_at(project: &Path) -> Result<ProjectConfig, CoreError> {
    let path = config_path_at(project);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse { path, source: e })
}

/// Atomically save `config` to `<project>/scriptree.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `rename`.
pub fn save_at(project: &Path, config: &ProjectConfig) -> Result<(), CoreError> {
    std::fs::create_dir_all(project)?;
    let path = config_path_at(project);
    let tmp_path = path.with_extension("yaml.tmp");

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
