// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod commit;
pub mod manifest;
pub mod plugin;
pub mod repository;

pub use commit::{Commit, latest_commit_date, parse_commit_date};
pub use manifest::{Author, Manifest, PluginResponse};
pub use plugin::{PluginCandidate, select_plugin};
pub use repository::{EntryKind, Repository, TreeEntry};
