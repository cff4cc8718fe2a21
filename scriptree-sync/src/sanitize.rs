//! File-safe, export-wide unique script names.
//!
//! Every name handed out here survives a trip through a manifest line
//! unchanged: characters the manifest format would strip or interpret
//! (`#`, `/`, control characters, surrounding spaces) never reach the tree,
//! and neither do names the tree layout uses for itself.

use std::collections::HashSet;

use scriptree_core::CATEGORY_PREFIX;

/// Name given to scripts and folders that have none.
pub const PLACEHOLDER_NAME: &str = "Untitled";

const FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '#'];

/// Replace every character a file name or manifest line cannot carry with
/// `-`, then drop surrounding spaces.
pub fn clean(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN.contains(&c) || c.is_control() {
                '-'
            } else {
                c
            }
        })
        .collect();
    mapped.trim_matches(' ').to_string()
}

fn non_empty(name: String) -> String {
    if name.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        name
    }
}

/// `base` if it is free, else the first free `"base (i)"`.
fn first_free(base: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&base) {
        return base;
    }
    let mut i = 1u32;
    loop {
        let candidate = format!("{base} ({i})");
        if !taken(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

/// Names the scripts tree uses for its own files and folders.
#[derive(Debug, Clone, Default)]
pub struct ReservedNames {
    scripts: Vec<String>,
    folders: Vec<String>,
}

impl ReservedNames {
    /// Reserved names of a tree whose manifests are called `manifest_name`,
    /// whose scripts end in `.extension` and whose backups live in
    /// `backup_dir`.
    pub fn for_layout(manifest_name: &str, extension: &str, backup_dir: &str) -> Self {
        let scripts = manifest_name
            .strip_suffix(&format!(".{extension}"))
            .map(|stem| vec![stem.to_string()])
            .unwrap_or_default();
        let folders = [".", "..", manifest_name, backup_dir]
            .iter()
            .map(|name| name.to_string())
            .collect();
        Self { scripts, folders }
    }

    fn is_folder_reserved(&self, name: &str) -> bool {
        self.folders.iter().any(|f| f == name)
    }
}

/// Folder name for a category title: cleaned, never empty, never reserved.
///
/// Folders are not numbered against each other; a repeated title maps to
/// the same folder.
pub fn folder_name(title: &str, reserved: &ReservedNames) -> String {
    first_free(non_empty(clean(title)), |name| reserved.is_folder_reserved(name))
}

/// Assigns names that are unique across one whole export.
///
/// Names are compared across folders because files are looked up by base
/// name. The result only depends on the order of calls.
#[derive(Debug, Default)]
pub struct NameSanitizer {
    used: HashSet<String>,
}

impl NameSanitizer {
    /// A sanitizer that never hands out the reserved script names.
    pub fn with_reserved(reserved: &ReservedNames) -> Self {
        Self {
            used: reserved.scripts.iter().cloned().collect(),
        }
    }

    /// Map `raw` to a clean name not handed out before, and record it.
    pub fn assign(&mut self, raw: &str) -> String {
        let mut base = non_empty(clean(raw));
        // A script must not come back as a category marker.
        if base.starts_with(CATEGORY_PREFIX) {
            base.replace_range(..1, "-");
        }
        let name = first_free(base, |name| self.used.contains(name));
        self.used.insert(name.clone());
        name
    }
}
