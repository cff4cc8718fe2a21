//! # scriptree-sync
//!
//! Two-way synchronization between a script container and a folder of
//! script files with load-order manifests.
//!
//! Open a project with [`ScriptSync::open`] and call
//! [`export`](ScriptSync::export) / [`import`](ScriptSync::import).
//! The building blocks are public for tools that inspect the tree:
//! [`manifest`] for the list file format, [`virtual_list`] for the
//! reconstructed load order.

pub mod backup;
pub mod classify;
pub mod diff;
pub mod engine;
pub mod error;
pub mod guard;
pub mod manifest;
pub mod sanitize;
pub mod tree;
pub mod virtual_list;
pub mod writer;

pub use classify::GroupingMode;
pub use diff::{diff_export, FileDiff};
pub use engine::{
    ExportPlan, ExportReport, ExternalizeReport, ImportReport, LoadReport, LoadedScript,
    ScriptSync, SetupReport, LOADER_NAME,
};
pub use error::SyncError;
pub use guard::{AlwaysEditable, EditGuard, MarkerFileGuard};
pub use tree::{ExportTree, TreeError};
pub use virtual_list::VirtualList;
pub use writer::WriteResult;
