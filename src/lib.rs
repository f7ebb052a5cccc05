// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod server;
pub mod utils;

pub use config::{Config, GitHubConfig, ServerConfig};
pub use error::{Result, ServerError};
pub use github::GitHubClient;
pub use models::{
    Author, Commit, Manifest, PluginCandidate, PluginResponse, Repository, TreeEntry,
};
pub use server::{PluginServer, resolve_plugin};
pub use utils::Validator;
