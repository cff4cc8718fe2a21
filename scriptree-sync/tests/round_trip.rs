use std::fs;
use std::time::{Duration, SystemTime};

use filetime::{set_file_mtime, FileTime};
use rstest::rstest;
use scriptree_core::{
    ContainerStore, FragmentId, FragmentRecord, ManifestEntry, ProjectConfig, YamlContainer,
};
use scriptree_sync::{manifest, ScriptSync, WriteResult};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn project(records: &[(&str, &str)]) -> (TempDir, ScriptSync) {
    init_logging();
    let dir = TempDir::new().expect("project");
    let sync = ScriptSync::new(dir.path(), ProjectConfig::default(), YamlContainer);
    let records: Vec<_> = records
        .iter()
        .enumerate()
        .map(|(i, (name, content))| FragmentRecord::new(FragmentId(i as u32 + 500), *name, *content))
        .collect();
    YamlContainer
        .save(&sync.container_path(), &records)
        .expect("save container");
    (dir, sync)
}

fn pairs(records: &[FragmentRecord]) -> Vec<(String, String)> {
    records
        .iter()
        .map(|r| (r.name.clone(), r.content.clone()))
        .collect()
}

#[rstest]
#[case::single_group(&[("@ Intro", ""), ("Script A", "a"), ("Script B", "b")])]
#[case::several_groups(&[
    ("@ Core", ""),
    ("Boot", "boot"),
    ("@ Battle", ""),
    ("Battle_Core", "core"),
    ("Battle_Ai", "ai"),
    ("", ""),
    ("Main", "main"),
])]
#[case::unicode(&[("@ Menüs", ""), ("Fenêtre", "# ✓\nputs 'ok'\n"), ("Scène", "x")])]
fn export_then_import_preserves_names_contents_and_groups(#[case] records: &[(&str, &str)]) {
    let (_dir, sync) = project(records);
    let original = YamlContainer.load(&sync.container_path()).expect("load");

    sync.export(false).expect("export");
    sync.import(false).expect("import");

    let back = YamlContainer.load(&sync.container_path()).expect("reload");
    assert_eq!(pairs(&back), pairs(&original));
    assert!(back.iter().all(|r| r.id.0 < 500), "ids must be regenerated");
}

#[rstest]
#[case::hash_in_script_name(
    &[("@ Fixes", ""), ("Patch #1", "puts 1"), ("Other", "o")],
    &[("@ Fixes", ""), ("Patch -1", "puts 1"), ("Other", "o")],
)]
#[case::hash_in_title(
    &[("@ Part #2", ""), ("A", "a"), ("B", "b")],
    &[("@ Part -2", ""), ("A", "a"), ("B", "b")],
)]
#[case::padding_tabs_and_slashes(
    &[("@  Spaced ", ""), (" lead", "l"), ("trail ", "t"), ("tab\tbed", "x"), ("dir/", "d")],
    &[("@ Spaced", ""), ("lead", "l"), ("trail", "t"), ("tab-bed", "x"), ("dir-", "d")],
)]
#[case::layout_names(
    &[("@ .", ""), ("A", "a"), ("@ _Backups", ""), ("_List", "real code"), ("@ ..", ""), ("B", "b")],
    &[("@ . (1)", ""), ("A", "a"), ("@ _Backups (1)", ""), ("_List (1)", "real code"), ("@ .. (1)", ""), ("B", "b")],
)]
fn awkward_names_round_trip_under_their_exported_names(
    #[case] records: &[(&str, &str)],
    #[case] expected: &[(&str, &str)],
) {
    let (dir, sync) = project(records);
    sync.export(false).expect("export");
    let exported = YamlContainer.load(&sync.container_path()).expect("load");
    let expected: Vec<_> = expected
        .iter()
        .map(|(name, content)| (name.to_string(), content.to_string()))
        .collect();
    assert_eq!(pairs(&exported), expected, "container keeps the exported names");

    let report = sync.import(false).expect("import");
    assert_eq!(pairs(&report.records), expected);
    assert!(report.missing.is_empty());
    assert!(report.skipped_folders.is_empty());

    let again = sync.export(false).expect("re-export");
    assert_eq!(again.renamed, 0);
    assert!(again.writes.iter().all(|w| !w.is_change()));
    assert!(
        !dir.path().join("B.rb").exists(),
        "nothing may be written outside the scripts root"
    );
}

#[test]
fn fallback_export_becomes_marker_grouped_on_import() {
    let (_dir, sync) = project(&[
        ("Game_Map", "map"),
        ("Window_Base", "base"),
        ("Window_Help", "help"),
        ("Custom Menu", "menu"),
        ("Main", "main"),
    ]);
    sync.export(false).expect("export");
    let report = sync.import(false).expect("import");
    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "@ Base Game Objects",
            "Game_Map",
            "@ Base Windows",
            "Window_Base",
            "Window_Help",
            "@ Custom Scripts",
            "Custom Menu",
            "@ Main",
            "Main",
        ]
    );

    // The re-imported container exports to the same tree.
    let again = sync.export(false).expect("re-export");
    assert!(again.writes.iter().all(|w| !w.is_change()));
}

#[test]
fn empty_scripts_never_reach_the_tree() {
    let (_dir, sync) = project(&[("@ Intro", ""), ("Blank", ""), ("Full", "x")]);
    sync.export(false).expect("export");
    let root = sync.scripts_root();
    assert!(!root.join("Intro").join("Blank.rb").exists());
    let entries = manifest::parse(&fs::read_to_string(root.join("Intro/_List.rb")).unwrap());
    assert_eq!(entries, vec![ManifestEntry::File("Full".into())]);
}

#[test]
fn folder_manifests_never_list_folders() {
    let (_dir, sync) = project(&[
        ("@ A", ""),
        ("a/1", "1"),
        ("@ B", ""),
        ("b/2", "2"),
        ("Window_Base", "w"),
    ]);
    sync.export(false).expect("export");
    let root = sync.scripts_root();
    for folder in ["A", "B"] {
        let text = fs::read_to_string(root.join(folder).join("_List.rb")).unwrap();
        assert!(manifest::parse(&text)
            .iter()
            .all(|e| matches!(e, ManifestEntry::File(_))));
    }
    assert!(root.join("A").join("a-1.rb").exists());
}

#[test]
fn unchanged_export_preserves_mtime() {
    let (_dir, sync) = project(&[("@ Intro", ""), ("Script A", "a"), ("Script B", "b")]);
    sync.export(false).expect("first export");

    let target = sync.scripts_root().join("Intro").join("Script A.rb");
    let old = FileTime::from_system_time(SystemTime::now() - Duration::from_secs(3600));
    set_file_mtime(&target, old).expect("set mtime");

    let report = sync.export(false).expect("second export");
    assert!(report
        .writes
        .iter()
        .any(|w| matches!(w, WriteResult::Unchanged { path } if path == &target)));
    let mtime = FileTime::from_last_modification_time(&fs::metadata(&target).unwrap());
    assert_eq!(mtime, old, "unchanged file was rewritten");
}

#[test]
fn edited_file_is_picked_up_by_import() {
    let (_dir, sync) = project(&[("@ Intro", ""), ("Script A", "a"), ("Script B", "b")]);
    sync.export(false).expect("export");
    fs::write(sync.scripts_root().join("Intro/Script B.rb"), "edited").unwrap();

    sync.import(false).expect("import");
    let records = YamlContainer.load(&sync.container_path()).unwrap();
    let b = records.iter().find(|r| r.name == "Script B").expect("Script B");
    assert_eq!(b.content, "edited");
}

#[test]
fn hand_written_manifest_order_drives_import() {
    let (_dir, sync) = project(&[("Unused", "u")]);
    let root = sync.scripts_root();
    fs::create_dir_all(root.join("Late")).unwrap();
    fs::write(root.join("Late/Second.rb"), "2").unwrap();
    fs::write(root.join("First.rb"), "1").unwrap();
    fs::write(root.join("Late/_List.rb"), "Second # runs after First\n").unwrap();
    fs::write(root.join("_List.rb"), "  First\n\nLate/\nGhost/\n").unwrap();

    let report = sync.import(false).expect("import");
    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["First", "@ Late", "Second"]);
    assert_eq!(report.skipped_folders, vec!["Ghost".to_string()]);
}
