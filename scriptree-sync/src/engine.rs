//! Export / import orchestration.
//!
//! [`ScriptSync`] binds a project root, its [`ProjectConfig`], a
//! [`ContainerStore`] and an [`EditGuard`]. Every command checks the guard
//! first and then runs as one linear pass. Files are written one by one, so
//! an I/O failure halfway leaves earlier files in place.

use std::path::{Path, PathBuf};

use scriptree_core::{
    config, ContainerStore, FragmentId, FragmentRecord, IdAllocator, ManifestEntry,
    ProjectConfig, VirtualEntry, YamlContainer,
};

use crate::backup;
use crate::classify::{self, GroupingMode};
use crate::error::{io_err, SyncError};
use crate::guard::{AlwaysEditable, EditGuard, MarkerFileGuard};
use crate::manifest;
use crate::sanitize::ReservedNames;
use crate::virtual_list::{self, ListLayout, VirtualList};
use crate::writer::{self, WriteResult};

/// Name of the single record left in an externalized container.
pub const LOADER_NAME: &str = "Scripts Loader";

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// A file an export would write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Everything an export would do, computed without touching the disk.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub mode: GroupingMode,
    /// Container records with sanitized names.
    pub records: Vec<FragmentRecord>,
    /// How many record names sanitizing changed.
    pub renamed: usize,
    /// Number of scripts exported.
    pub scripts: usize,
    /// Script files in load order, then folder manifests, then the root manifest.
    pub files: Vec<PlannedFile>,
}

/// Outcome of `export`.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub mode: GroupingMode,
    pub scripts: usize,
    pub renamed: usize,
    pub writes: Vec<WriteResult>,
}

/// Outcome of `externalize`.
#[derive(Debug, Clone)]
pub struct ExternalizeReport {
    pub backup: Option<PathBuf>,
    pub export: ExportReport,
}

/// A script read from the tree by `load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedScript {
    pub name: String,
    /// Path relative to the scripts root.
    pub path: String,
    pub content: String,
}

/// Outcome of `load`.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub scripts: Vec<LoadedScript>,
    /// Listed files that do not exist, relative to the scripts root.
    pub missing: Vec<String>,
    pub skipped_folders: Vec<String>,
}

/// Outcome of `import`.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// The new container contents, in order.
    pub records: Vec<FragmentRecord>,
    pub missing: Vec<String>,
    pub skipped_folders: Vec<String>,
    pub backup: Option<PathBuf>,
}

/// Outcome of `setup`.
#[derive(Debug, Clone, Default)]
pub struct SetupReport {
    /// Directories and files that did not exist before.
    pub created: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// ScriptSync
// ---------------------------------------------------------------------------

/// Synchronizes one project's container with its script tree.
pub struct ScriptSync<C: ContainerStore = YamlContainer> {
    project: PathBuf,
    config: ProjectConfig,
    store: C,
    guard: Box<dyn EditGuard>,
}

impl ScriptSync<YamlContainer> {
    /// Open the project at `project`, reading `scriptree.yaml` if present.
    pub fn open(project: &Path) -> Result<Self, SyncError> {
        let config = config::load_at(project)?;
        Ok(Self::new(project, config, YamlContainer))
    }
}

impl<C: ContainerStore> ScriptSync<C> {
    /// Build a service for `project`. The guard follows `config.project_marker`.
    pub fn new(project: &Path, config: ProjectConfig, store: C) -> Self {
        let guard: Box<dyn EditGuard> = match &config.project_marker {
            Some(marker) => Box::new(MarkerFileGuard::new(project, marker)),
            None => Box::new(AlwaysEditable),
        };
        Self {
            project: project.to_path_buf(),
            config,
            store,
            guard,
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn scripts_root(&self) -> PathBuf {
        self.config.scripts_root(&self.project)
    }

    pub fn container_path(&self) -> PathBuf {
        self.config.container_path(&self.project)
    }

    fn reserved_names(&self) -> ReservedNames {
        ReservedNames::for_layout(
            &self.config.manifest_name,
            &self.config.extension,
            &self.config.backup_dir.to_string_lossy(),
        )
    }

    // -- setup -------------------------------------------------------------

    /// Write the project configuration, then create the scripts root, the
    /// backup folder and an empty root manifest. Existing files are kept.
    pub fn setup(&self) -> Result<SetupReport, SyncError> {
        self.guard.check()?;
        let mut report = SetupReport::default();

        let config_file = config::config_path_at(&self.project);
        if !config_file.exists() {
            config::save_at(&self.project, &self.config)?;
            report.created.push(config_file);
        }

        for dir in [self.scripts_root(), self.config.backup_root(&self.project)] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
                report.created.push(dir);
            }
        }

        let root_manifest = self.config.root_manifest(&self.project);
        if !root_manifest.exists() {
            let text = manifest::format(&[], self.config.line_ending);
            writer::write_file(&root_manifest, &text, false)?;
            report.created.push(root_manifest);
        }
        Ok(report)
    }

    // -- export ------------------------------------------------------------

    /// Compute what `export` would write.
    pub fn plan_export(&self) -> Result<ExportPlan, SyncError> {
        self.guard.check()?;
        let records = self.store.load(&self.container_path())?;
        self.plan_from(records)
    }

    fn plan_from(&self, mut records: Vec<FragmentRecord>) -> Result<ExportPlan, SyncError> {
        if records.len() <= 1 {
            return Err(SyncError::NothingToExport);
        }

        let classified = classify::classify(&mut records, &self.reserved_names())?;
        let tree = &classified.tree;
        let root = self.scripts_root();
        let eol = self.config.line_ending;
        let mut files = Vec::with_capacity(tree.item_count() + tree.branches().len() + 1);

        for (folder, name) in tree.items() {
            let dir = match folder {
                Some(folder) => root.join(folder),
                None => root.clone(),
            };
            files.push(PlannedFile {
                path: dir.join(self.config.file_name(name)),
                content: classified.contents.get(name).cloned().unwrap_or_default(),
            });
        }
        for folder in tree.branches() {
            let entries: Vec<ManifestEntry> = tree
                .branch_items(folder)
                .iter()
                .cloned()
                .map(ManifestEntry::File)
                .collect();
            files.push(PlannedFile {
                path: root.join(folder).join(&self.config.manifest_name),
                content: manifest::format(&entries, eol),
            });
        }
        files.push(PlannedFile {
            path: self.config.root_manifest(&self.project),
            content: manifest::format(&tree.root_entries(), eol),
        });

        Ok(ExportPlan {
            mode: classified.mode,
            scripts: tree.item_count(),
            renamed: classified.renamed,
            records,
            files,
        })
    }

    /// Write every non-empty script and the manifests to the scripts tree.
    ///
    /// Sanitized names are saved back into the container so the next export
    /// produces the same paths.
    pub fn export(&self, dry_run: bool) -> Result<ExportReport, SyncError> {
        self.guard.check()?;
        let records = self.store.load(&self.container_path())?;
        self.export_records(records, dry_run)
    }

    fn export_records(
        &self,
        records: Vec<FragmentRecord>,
        dry_run: bool,
    ) -> Result<ExportReport, SyncError> {
        let plan = self.plan_from(records)?;
        tracing::info!(
            "exporting {} scripts ({:?} grouping) to {}",
            plan.scripts,
            plan.mode,
            self.scripts_root().display()
        );

        if plan.renamed > 0 && !dry_run {
            self.store.save(&self.container_path(), &plan.records)?;
        }

        let mut writes = Vec::with_capacity(plan.files.len());
        for file in &plan.files {
            writes.push(writer::write_file(&file.path, &file.content, dry_run)?);
        }

        Ok(ExportReport {
            mode: plan.mode,
            scripts: plan.scripts,
            renamed: plan.renamed,
            writes,
        })
    }

    /// Back up the container, export it, then leave only a loader record.
    pub fn externalize(&self) -> Result<ExternalizeReport, SyncError> {
        self.guard.check()?;
        let container = self.container_path();
        let records = self.store.load(&container)?;
        if records.len() <= 1 {
            return Err(SyncError::NothingToExport);
        }

        let backup = backup::backup_container(&self.config.backup_root(&self.project), &container)?;
        let export = self.export_records(records, false)?;

        let stub = FragmentRecord::new(FragmentId(1), LOADER_NAME, self.loader_stub());
        self.store.save(&container, &[stub])?;
        tracing::info!("container replaced by '{LOADER_NAME}'");

        Ok(ExternalizeReport { backup, export })
    }

    fn loader_stub(&self) -> String {
        let eol = self.config.line_ending.as_str();
        let root = self.config.root_dir.display();
        [
            format!("# {LOADER_NAME}"),
            format!("# Scripts live in \"{root}/\"; load order is \"{root}/{}\".", self.config.manifest_name),
            "# Run `scriptree import` to move them back into this container.".to_string(),
        ]
        .iter()
        .fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push_str(eol);
            out
        })
    }

    // -- load / import -------------------------------------------------------

    /// Reconstruct the load order from the manifests on disk.
    pub fn virtual_list(&self, formatted: bool) -> Result<VirtualList, SyncError> {
        let root_manifest = self.config.root_manifest(&self.project);
        let text = writer::read_existing(&root_manifest)?.unwrap_or_default();
        let entries = manifest::parse(&text);
        let root = self.scripts_root();
        let layout = ListLayout {
            root: &root,
            manifest_name: &self.config.manifest_name,
            extension: &self.config.extension,
        };
        virtual_list::build(&entries, layout, formatted)
    }

    /// Read every listed script in load order. Missing files are reported
    /// and skipped.
    pub fn load(&self) -> Result<LoadReport, SyncError> {
        self.guard.check()?;
        let list = self.virtual_list(false)?;
        let root = self.scripts_root();
        let mut report = LoadReport {
            skipped_folders: list.skipped_folders.clone(),
            ..LoadReport::default()
        };

        for entry in &list.entries {
            let VirtualEntry::File(path) = entry else {
                continue;
            };
            match writer::read_existing(&root.join(path))? {
                Some(content) => report.scripts.push(LoadedScript {
                    name: entry.display_name(),
                    path: path.clone(),
                    content,
                }),
                None => {
                    tracing::warn!("listed script {path} does not exist; skipping");
                    report.missing.push(path.clone());
                }
            }
        }
        Ok(report)
    }

    /// Rebuild the container from the scripts tree.
    ///
    /// Every record gets a fresh identifier. A listed file that is missing
    /// still yields a record, with empty content.
    pub fn import(&self, dry_run: bool) -> Result<ImportReport, SyncError> {
        self.guard.check()?;
        let list = self.virtual_list(true)?;
        if list.is_empty() {
            return Err(SyncError::NothingToImport);
        }

        let root = self.scripts_root();
        let mut ids = IdAllocator::new();
        let mut report = ImportReport {
            skipped_folders: list.skipped_folders.clone(),
            ..ImportReport::default()
        };

        for entry in &list.entries {
            let content = match entry {
                VirtualEntry::File(path) => match writer::read_existing(&root.join(path))? {
                    Some(content) => content,
                    None => {
                        tracing::warn!("listed script {path} does not exist; importing it empty");
                        report.missing.push(path.clone());
                        String::new()
                    }
                },
                VirtualEntry::Category(_) | VirtualEntry::Separator => String::new(),
            };
            report
                .records
                .push(FragmentRecord::new(ids.next_id(), entry.display_name(), content));
        }

        if !dry_run {
            let container = self.container_path();
            report.backup =
                backup::backup_container(&self.config.backup_root(&self.project), &container)?;
            self.store.save(&container, &report.records)?;
            tracing::info!(
                "imported {} records into {}",
                report.records.len(),
                container.display()
            );
        }
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{CUSTOM_GROUP, UNSORTED_GROUP};
    use std::fs;
    use tempfile::TempDir;

    fn project_with(records: &[(&str, &str)]) -> (TempDir, ScriptSync) {
        let dir = TempDir::new().unwrap();
        let sync = ScriptSync::new(dir.path(), ProjectConfig::default(), YamlContainer);
        let records: Vec<_> = records
            .iter()
            .enumerate()
            .map(|(i, (name, content))| {
                FragmentRecord::new(FragmentId(100 + i as u32), *name, *content)
            })
            .collect();
        YamlContainer.save(&sync.container_path(), &records).unwrap();
        (dir, sync)
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn export_needs_more_than_one_record() {
        let (_dir, sync) = project_with(&[("Main", "main")]);
        assert!(matches!(sync.export(false), Err(SyncError::NothingToExport)));
        assert!(!sync.scripts_root().exists());
    }

    #[test]
    fn fallback_export_places_stock_scripts() {
        let (_dir, sync) = project_with(&[("Window_Base", "class Window_Base; end"), ("Main", "main")]);
        let report = sync.export(false).unwrap();
        assert_eq!(report.mode, GroupingMode::Fallback);
        assert_eq!(report.scripts, 2);

        let root = sync.scripts_root();
        assert_eq!(read(root.join("Base Windows/Window_Base.rb")), "class Window_Base; end");
        let root_entries = manifest::parse(&read(root.join("_List.rb")));
        assert!(root_entries.contains(&ManifestEntry::Folder("Base Windows".into())));
        assert_eq!(
            manifest::parse(&read(root.join("Base Windows/_List.rb"))),
            vec![ManifestEntry::File("Window_Base".into())]
        );
    }

    #[test]
    fn export_persists_sanitized_names() {
        let (_dir, sync) = project_with(&[("A", "1"), ("A", "2"), ("x:y", "3")]);
        let report = sync.export(false).unwrap();
        assert_eq!(report.renamed, 2);
        let names: Vec<_> = YamlContainer
            .load(&sync.container_path())
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "A (1)", "x-y"]);
        assert!(sync.scripts_root().join(CUSTOM_GROUP).join("A (1).rb").exists());
    }

    #[test]
    fn layout_names_do_not_clobber_scripts() {
        let (_dir, sync) = project_with(&[
            ("@ .", ""),
            ("A", "a"),
            ("@ Intro", ""),
            ("_List", "real code"),
        ]);
        sync.export(false).unwrap();
        let root = sync.scripts_root();
        assert_eq!(read(root.join(". (1)").join("A.rb")), "a");
        assert_eq!(read(root.join("Intro").join("_List (1).rb")), "real code");

        let report = sync.import(true).unwrap();
        let records: Vec<_> = report
            .records
            .iter()
            .map(|r| (r.name.as_str(), r.content.as_str()))
            .collect();
        assert_eq!(
            records,
            vec![
                ("@ . (1)", ""),
                ("A", "a"),
                ("@ Intro", ""),
                ("_List (1)", "real code"),
            ]
        );
    }

    #[test]
    fn second_export_is_unchanged() {
        let (_dir, sync) = project_with(&[("@ Intro", ""), ("Script A", "code")]);
        sync.export(false).unwrap();
        let again = sync.export(false).unwrap();
        assert!(again.writes.iter().all(|w| !w.is_change()));
    }

    #[test]
    fn dry_run_export_writes_nothing() {
        let (_dir, sync) = project_with(&[("A", "1"), ("A", "2")]);
        let report = sync.export(true).unwrap();
        assert!(report
            .writes
            .iter()
            .all(|w| matches!(w, WriteResult::WouldWrite { .. })));
        assert!(!sync.scripts_root().exists());
        let names: Vec<_> = YamlContainer
            .load(&sync.container_path())
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "A"], "dry-run must not rename records");
    }

    #[test]
    fn marker_round_trip_restores_title() {
        let (_dir, sync) = project_with(&[("@ Intro", ""), ("Script A", "code")]);
        sync.export(false).unwrap();
        assert!(sync.scripts_root().join("Intro/Script A.rb").exists());

        let report = sync.import(false).unwrap();
        let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["@ Intro", "Script A"]);
        assert_eq!(report.records[1].content, "code");
        assert!(report.backup.is_some());
    }

    #[test]
    fn import_assigns_fresh_unique_ids() {
        let (_dir, sync) = project_with(&[("@ A", ""), ("x", "1"), ("@ B", ""), ("y", "2")]);
        sync.export(false).unwrap();
        let report = sync.import(false).unwrap();
        let mut ids: Vec<_> = report.records.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), report.records.len());
        assert!(report.records.iter().all(|r| r.id.0 < 100));
    }

    #[test]
    fn import_with_missing_file_keeps_an_empty_record() {
        let (_dir, sync) = project_with(&[("@ Intro", ""), ("A", "a"), ("B", "b")]);
        sync.export(false).unwrap();
        fs::remove_file(sync.scripts_root().join("Intro/A.rb")).unwrap();

        let report = sync.import(true).unwrap();
        assert_eq!(report.missing, vec!["Intro/A.rb".to_string()]);
        let a = report.records.iter().find(|r| r.name == "A").expect("record A");
        assert!(a.content.is_empty());
        assert!(report.backup.is_none(), "dry-run must not back up");
    }

    #[test]
    fn import_without_manifest_has_nothing_to_do() {
        let (_dir, sync) = project_with(&[("A", "1"), ("B", "2")]);
        assert!(matches!(sync.import(false), Err(SyncError::NothingToImport)));
    }

    #[test]
    fn load_skips_missing_files() {
        let (_dir, sync) = project_with(&[("First", "1"), ("Second", "2")]);
        sync.export(false).unwrap();
        fs::remove_file(sync.scripts_root().join(CUSTOM_GROUP).join("First.rb")).unwrap();

        let report = sync.load().unwrap();
        let names: Vec<_> = report.scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Second"]);
        assert_eq!(report.missing, vec![format!("{CUSTOM_GROUP}/First.rb")]);
    }

    #[test]
    fn externalize_leaves_loader_stub() {
        let (_dir, sync) = project_with(&[("Early", "e"), ("@ Intro", ""), ("A", "a")]);
        let report = sync.externalize().unwrap();
        assert!(report.backup.expect("backup").exists());
        assert!(sync.scripts_root().join(UNSORTED_GROUP).join("Early.rb").exists());

        let records = YamlContainer.load(&sync.container_path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, LOADER_NAME);
        assert!(records[0].content.contains("_List.rb"));

        assert!(matches!(sync.externalize(), Err(SyncError::NothingToExport)));
    }

    #[test]
    fn setup_creates_layout_once() {
        let dir = TempDir::new().unwrap();
        let sync = ScriptSync::new(dir.path(), ProjectConfig::default(), YamlContainer);
        let first = sync.setup().unwrap();
        assert_eq!(first.created.len(), 4);
        assert!(manifest::parse(&read(sync.config().root_manifest(dir.path()))).is_empty());
        assert_eq!(config::load_at(dir.path()).unwrap(), ProjectConfig::default());
        assert!(sync.setup().unwrap().created.is_empty());
    }

    #[test]
    fn guard_failure_changes_nothing() {
        let (dir, _) = project_with(&[("A", "1"), ("B", "2")]);
        let config = ProjectConfig {
            project_marker: Some("Game.proj".to_string()),
            ..ProjectConfig::default()
        };
        let sync = ScriptSync::new(dir.path(), config, YamlContainer);
        assert!(matches!(sync.export(false), Err(SyncError::NotEditable { .. })));
        assert!(matches!(sync.setup(), Err(SyncError::NotEditable { .. })));
        assert!(!sync.scripts_root().exists());
    }
}
