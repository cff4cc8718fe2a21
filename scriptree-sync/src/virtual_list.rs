//! Reconstruction of the full load order from the manifests on disk.
//!
//! The root manifest lists loose scripts and folders; every folder has its
//! own manifest listing scripts. Flattening both gives the order in which
//! scripts load. A *formatted* list additionally carries the grouping as
//! marker entries, so it can be written back into a container:
//!
//! - every folder group starts with a [`VirtualEntry::Category`] title;
//! - a loose script that directly follows a folder group is preceded by a
//!   [`VirtualEntry::Separator`].
//!
//! A folder without a manifest of its own contributes nothing, not even its
//! title, and does not end the folder group before it.

use std::io::ErrorKind;
use std::path::Path;

use scriptree_core::{ManifestEntry, VirtualEntry};

use crate::error::{io_err, SyncError};
use crate::manifest;

/// Where folder manifests live and how script files are named.
#[derive(Debug, Clone, Copy)]
pub struct ListLayout<'a> {
    /// Scripts root directory.
    pub root: &'a Path,
    /// File name of every manifest.
    pub manifest_name: &'a str,
    /// Script extension without the dot.
    pub extension: &'a str,
}

/// Flattened load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualList {
    pub entries: Vec<VirtualEntry>,
    /// Folders listed in the root manifest that have no manifest of their own.
    pub skipped_folders: Vec<String>,
}

impl VirtualList {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Script paths only, relative to the scripts root.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            VirtualEntry::File(path) => Some(path.as_str()),
            _ => None,
        })
    }
}

/// Build the load order described by the root manifest's `entries`.
///
/// A folder whose manifest is missing is skipped and recorded in
/// [`VirtualList::skipped_folders`]; any other read failure aborts.
pub fn build(
    entries: &[ManifestEntry],
    layout: ListLayout<'_>,
    formatted: bool,
) -> Result<VirtualList, SyncError> {
    let mut list = VirtualList::default();
    let mut after_folder = false;

    for entry in entries {
        match entry {
            ManifestEntry::File(name) => {
                if formatted && after_folder {
                    list.entries.push(VirtualEntry::Separator);
                }
                list.entries
                    .push(VirtualEntry::File(format!("{name}.{}", layout.extension)));
                after_folder = false;
            }
            ManifestEntry::Folder(folder) => {
                let path = layout.root.join(folder).join(layout.manifest_name);
                let text = match std::fs::read_to_string(&path) {
                    Ok(text) => text,
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        tracing::warn!(
                            "folder '{folder}' is listed but has no {}; skipping it",
                            layout.manifest_name
                        );
                        list.skipped_folders.push(folder.clone());
                        continue;
                    }
                    Err(e) => return Err(io_err(&path, e)),
                };

                if formatted {
                    list.entries.push(VirtualEntry::Category(folder.clone()));
                }
                for sub in manifest::parse(&text) {
                    match sub {
                        ManifestEntry::File(name) => list.entries.push(VirtualEntry::File(
                            format!("{folder}/{name}.{}", layout.extension),
                        )),
                        ManifestEntry::Folder(nested) => tracing::warn!(
                            "ignoring nested folder '{nested}/' in '{folder}'; only one level is supported"
                        ),
                    }
                }
                after_folder = true;
            }
        }
    }

    Ok(list)
}
