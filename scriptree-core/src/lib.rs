//! scriptree core library: domain types, configuration, container store, errors.
//!
//! - [`types`]: records, manifest entries, virtual list entries
//! - [`config`]: per-project layout configuration
//! - [`container`]: [`ContainerStore`] seam and the YAML-backed store
//! - [`ids`]: identifier allocation
//! - [`error`]: [`CoreError`]

pub mod config;
pub mod container;
pub mod error;
pub mod ids;
pub mod types;

pub use config::{LineEnding, ProjectConfig};
pub use container::{ContainerStore, YamlContainer};
pub use error::CoreError;
pub use ids::IdAllocator;
pub use types::{
    category_title, FragmentId, FragmentRecord, ManifestEntry, RecordKind, VirtualEntry,
    CATEGORY_PREFIX,
};
