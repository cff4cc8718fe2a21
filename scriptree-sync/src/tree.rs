//! In-memory folder layout of one export.
//!
//! An [`ExportTree`] is an ordered list of folders, each with an ordered list
//! of script names, interleaved with runs of loose scripts that live directly
//! in the scripts root. Depth is fixed at one level.

use scriptree_core::ManifestEntry;
use thiserror::Error;

/// Misuse of the tree API. Each failing call leaves the tree unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("folder '{0}' already exists")]
    BranchExists(String),

    #[error("folder '{0}' does not exist")]
    MissingBranch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Folder { name: String, items: Vec<String> },
    Loose(Vec<String>),
}

/// Ordered folder → script names mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTree {
    nodes: Vec<Node>,
}

impl ExportTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.folder(name).is_some()
    }

    /// Append a new, empty folder.
    pub fn add_branch(&mut self, name: &str) -> Result<(), TreeError> {
        if self.has_branch(name) {
            tracing::warn!("folder '{name}' already exists in the export tree");
            return Err(TreeError::BranchExists(name.to_string()));
        }
        self.nodes.push(Node::Folder {
            name: name.to_string(),
            items: Vec::new(),
        });
        Ok(())
    }

    /// Append `item` to an existing folder. Folders are never created here.
    pub fn add_item(&mut self, item: &str, branch: &str) -> Result<(), TreeError> {
        match self.folder_mut(branch) {
            Some(items) => {
                items.push(item.to_string());
                Ok(())
            }
            None => {
                tracing::warn!("cannot add '{item}': folder '{branch}' is not in the export tree");
                Err(TreeError::MissingBranch(branch.to_string()))
            }
        }
    }

    /// Append `item` to the scripts root, after everything added so far.
    pub fn add_loose_item(&mut self, item: &str) {
        if let Some(Node::Loose(items)) = self.nodes.last_mut() {
            items.push(item.to_string());
        } else {
            self.nodes.push(Node::Loose(vec![item.to_string()]));
        }
    }

    /// Folder names in insertion order.
    pub fn branches(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Folder { name, .. } => Some(name.as_str()),
                Node::Loose(_) => None,
            })
            .collect()
    }

    /// Script names of one folder in insertion order; empty if absent.
    pub fn branch_items(&self, name: &str) -> &[String] {
        self.folder(name).unwrap_or(&[])
    }

    /// Entries of the root manifest: folders and loose scripts in tree order.
    pub fn root_entries(&self) -> Vec<ManifestEntry> {
        let mut entries = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Folder { name, .. } => entries.push(ManifestEntry::Folder(name.clone())),
                Node::Loose(items) => {
                    entries.extend(items.iter().cloned().map(ManifestEntry::File));
                }
            }
        }
        entries
    }

    /// Every script as `(folder, name)` in load order; loose scripts have no folder.
    pub fn items(&self) -> Vec<(Option<&str>, &str)> {
        let mut out = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Folder { name, items } => {
                    out.extend(items.iter().map(|item| (Some(name.as_str()), item.as_str())));
                }
                Node::Loose(items) => out.extend(items.iter().map(|item| (None, item.as_str()))),
            }
        }
        out
    }

    pub fn item_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                Node::Folder { items, .. } | Node::Loose(items) => items.len(),
            })
            .sum()
    }

    fn folder(&self, name: &str) -> Option<&[String]> {
        self.nodes.iter().find_map(|node| match node {
            Node::Folder { name: n, items } if n == name => Some(items.as_slice()),
            _ => None,
        })
    }

    fn folder_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.nodes.iter_mut().find_map(|node| match node {
            Node::Folder { name: n, items } if n == name => Some(items),
            _ => None,
        })
    }
}
