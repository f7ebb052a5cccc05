// file: src/models/repository.rs
// description: repository and root tree entries as returned by the GitHub API
// reference: https://docs.github.com/en/rest/git/trees

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    // submodule entries carry no url
    #[serde(default)]
    pub url: String,
}

impl TreeEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Tree
    }

    /// Path as shown in a root listing: directories get a trailing slash.
    pub fn listing_key(&self) -> String {
        if self.is_directory() {
            format!("{}/", self.path)
        } else {
            self.path.clone()
        }
    }
}
