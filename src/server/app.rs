// file: src/server/app.rs
// description: explicit HTTP server instance, routing and shared state
// reference: https://docs.rs/axum

use crate::config::Config;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::server::handler::get_plugin;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub client: GitHubClient,
}

pub struct PluginServer {
    config: Config,
    state: AppState,
}

impl PluginServer {
    pub fn new(config: Config) -> Result<Self> {
        let client = GitHubClient::new(&config.github)?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: Config, client: GitHubClient) -> Self {
        Self {
            config,
            state: AppState { client },
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/{name}", get(get_plugin))
            .with_state(self.state.clone())
    }

    pub async fn bind(&self) -> Result<TcpListener> {
        Ok(TcpListener::bind(self.config.listen_addr()).await?)
    }

    /// Serves requests until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!("Listening on http://{}", listener.local_addr()?);
        info!("Upstream API: {}", self.config.github.api_url);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Cannot listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
