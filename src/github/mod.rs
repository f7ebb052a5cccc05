// file: src/github/mod.rs
// description: GitHub API client module exports
// reference: internal module structure

pub mod client;

pub use client::GitHubClient;
