// file: src/models/plugin.rs
// description: recognition of jQuery plugin source files in a root tree

use crate::models::TreeEntry;
use serde::Serialize;

pub const PLUGIN_PREFIX: &str = "jquery.";
pub const PLUGIN_EXTENSION: &str = ".js";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginCandidate {
    /// Display name: lowercased basename without the `jquery.` prefix.
    pub name: String,
    /// Path exactly as listed by the tree, used for commit and content lookups.
    pub filename: String,
    pub url: String,
}

impl PluginCandidate {
    pub fn from_entry(entry: &TreeEntry) -> Option<Self> {
        if entry.is_directory() {
            return None;
        }

        let lowered = entry.listing_key().to_lowercase();
        let (stem, extension) = split_extension(&lowered);
        if extension != PLUGIN_EXTENSION {
            return None;
        }

        let name = stem.strip_prefix(PLUGIN_PREFIX)?;
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            filename: entry.path.clone(),
            url: entry.url.clone(),
        })
    }
}

/// First recognizable plugin file in listing order.
pub fn select_plugin(entries: &[TreeEntry]) -> Option<PluginCandidate> {
    entries.iter().find_map(PluginCandidate::from_entry)
}

/// Splits a path's basename into stem and extension (dot included).
/// Leading dots belong to the stem, so `.js` has no extension.
fn split_extension(path: &str) -> (&str, &str) {
    let basename = path.rsplit('/').next().unwrap_or(path);
    let leading_dots = basename.len() - basename.trim_start_matches('.').len();

    match basename[leading_dots..].rfind('.') {
        Some(idx) => basename.split_at(leading_dots + idx),
        None => (basename, ""),
    }
}
