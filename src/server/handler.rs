// file: src/server/handler.rs
// description: plugin endpoint handler and error-to-response mapping
// reference: https://docs.rs/axum

use crate::error::{Result, ServerError};
use crate::github::GitHubClient;
use crate::models::{Manifest, PluginResponse, latest_commit_date, select_plugin};
use crate::server::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use std::time::Instant;
use tracing::{debug, error, info};

/// Looks up `name` on GitHub and assembles the manifest response.
///
/// Calls are issued one after another: search, root tree, commit history
/// for the selected file, then the file content itself.
pub async fn resolve_plugin(client: &GitHubClient, name: &str) -> Result<PluginResponse> {
    let repository = client
        .search_repositories(name)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ServerError::NotFound(format!("No repository found for '{}'", name)))?;
    debug!("Matched repository {}", repository.full_name());

    let entries = client
        .list_root_files(&repository.owner, &repository.name, None)
        .await?;
    let candidate = select_plugin(&entries).ok_or_else(|| {
        ServerError::NotFound(format!(
            "No recognizable plugin file in {}",
            repository.full_name()
        ))
    })?;
    debug!("Selected plugin file {}", candidate.filename);

    let commits = client
        .list_commits(
            &repository.owner,
            &repository.name,
            None,
            Some(&candidate.filename),
        )
        .await?;
    let date = latest_commit_date(&commits)?;

    let manifest = Manifest::new(&candidate.name, &repository);
    let content = client
        .fetch_file_content(&repository.owner, &repository.name, &candidate.filename, None)
        .await?;

    Ok(PluginResponse::new(manifest, &content, date))
}

pub async fn get_plugin(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PluginResponse>> {
    info!("Plugin request: {}", name);
    let started = Instant::now();

    let response = resolve_plugin(&state.client, &name).await?;

    info!(
        "Served plugin {} ({}) in {} ms",
        response.manifest.name,
        response.manifest.homepage,
        started.elapsed().as_millis()
    );
    Ok(Json(response))
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            info!("Not found: {}", self);
        } else {
            error!("Request failed: {}", self);
        }

        (self.status_code(), self.to_string()).into_response()
    }
}
