// file: src/server/mod.rs
// description: HTTP server module exports
// reference: internal module structure

pub mod app;
pub mod handler;

pub use app::{AppState, PluginServer};
pub use handler::resolve_plugin;
