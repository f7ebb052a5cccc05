// file: src/models/manifest.rs
// description: synthesized plugin manifest and endpoint response body
// reference: jQuery plugin registry manifest format

use crate::models::Repository;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

pub const GITHUB_WEB_URL: &str = "http://github.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub title: String,
    pub author: Author,
    pub homepage: String,
}

impl Manifest {
    pub fn new(display_name: &str, repository: &Repository) -> Self {
        Self {
            name: display_name.to_string(),
            title: repository.name.clone(),
            author: Author {
                name: repository.owner.clone(),
                url: format!("{}/{}", GITHUB_WEB_URL, repository.owner),
            },
            homepage: format!(
                "{}/{}/{}",
                GITHUB_WEB_URL, repository.owner, repository.name
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResponse {
    pub manifest: Manifest,
    /// Plugin source, standard base64 with padding.
    pub file: String,
    pub date: String,
}

impl PluginResponse {
    pub fn new(manifest: Manifest, content: &[u8], date: String) -> Self {
        Self {
            manifest,
            file: STANDARD.encode(content),
            date,
        }
    }

    pub fn decode_file(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.file)
    }
}
