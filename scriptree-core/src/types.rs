//! Domain types for script containers and their on-disk manifests.
//!
//! A container is an ordered list of [`FragmentRecord`]s. Some records are not
//! real scripts but grouping pseudo-records; [`FragmentRecord::kind`] tells
//! them apart.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name prefix that turns a record into a category marker (`"@ Battle"`).
pub const CATEGORY_PREFIX: &str = "@ ";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque identifier of a record inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentId(pub u32);

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for FragmentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One record of a script container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentRecord {
    pub id: FragmentId,
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl FragmentRecord {
    pub fn new(id: FragmentId, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: content.into(),
        }
    }

    /// Classify this record by its name and content.
    pub fn kind(&self) -> RecordKind<'_> {
        if let Some(title) = category_title(&self.name) {
            return RecordKind::Category(title);
        }
        if self.name.is_empty() && self.content.is_empty() {
            return RecordKind::Separator;
        }
        RecordKind::Fragment
    }

    /// `true` when the record has nothing to export.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// What a stored record stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind<'a> {
    /// A regular script.
    Fragment,
    /// Start of a named group; carries the title without its prefix.
    Category(&'a str),
    /// Unnamed, empty record closing the current group.
    Separator,
}

/// Returns the group title when `name` is a category marker.
///
/// `"@ "` alone is not a marker; the title must be non-empty.
pub fn category_title(name: &str) -> Option<&str> {
    name.strip_prefix(CATEGORY_PREFIX)
        .filter(|title| !title.is_empty())
}

// ---------------------------------------------------------------------------
// Manifest and virtual list entries
// ---------------------------------------------------------------------------

/// A single line of a load-order manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ManifestEntry {
    /// A script file in the same directory, named without extension.
    File(String),
    /// A sub-folder that carries its own manifest.
    Folder(String),
}

/// One item of the reconstructed load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualEntry {
    /// Path of a script file relative to the scripts root, extension included.
    File(String),
    /// Group title inserted in formatted lists.
    Category(String),
    /// Group boundary inserted in formatted lists.
    Separator,
}

impl VirtualEntry {
    /// Record name this entry takes when written back into a container.
    ///
    /// Files use their base name without extension; markers use their
    /// display form.
    pub fn display_name(&self) -> String {
        match self {
            VirtualEntry::File(path) => {
                let base = path.rsplit('/').next().unwrap_or(path);
                match base.rfind('.') {
                    Some(dot) if dot > 0 => base[..dot].to_string(),
                    _ => base.to_string(),
                }
            }
            VirtualEntry::Category(title) => format!("{CATEGORY_PREFIX}{title}"),
            VirtualEntry::Separator => String::new(),
        }
    }

    pub fn is_marker(&self) -> bool {
        !matches!(self, VirtualEntry::File(_))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
