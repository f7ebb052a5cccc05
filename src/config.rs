// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, ServerError};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// Base URL of the REST API, without trailing slash.
    pub api_url: String,
    /// Ref used for tree listings and content retrieval when none is given.
    pub default_ref: String,
    /// GitHub rejects requests without a User-Agent header.
    pub user_agent: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default_config();
        let mut builder = config::Config::builder()
            .set_default("server.host", defaults.server.host)
            .and_then(|b| b.set_default("server.port", i64::from(defaults.server.port)))
            .and_then(|b| b.set_default("github.api_url", defaults.github.api_url))
            .and_then(|b| b.set_default("github.default_ref", defaults.github.default_ref))
            .and_then(|b| b.set_default("github.user_agent", defaults.github.user_agent))
            .map_err(|e| ServerError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("JQPM_SERVER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: DEFAULT_PORT,
            },
            github: GitHubConfig {
                api_url: "https://api.github.com".to_string(),
                default_ref: "master".to_string(),
                user_agent: format!("jqpm-server/{}", env!("CARGO_PKG_VERSION")),
            },
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_port(self.server.port).map_err(into_config_error)?;
        Validator::validate_url(&self.github.api_url).map_err(into_config_error)?;
        Validator::validate_not_empty("github.default_ref", &self.github.default_ref)
            .map_err(into_config_error)?;
        Validator::validate_not_empty("github.user_agent", &self.github.user_agent)
            .map_err(into_config_error)?;
        Ok(())
    }
}

fn into_config_error(err: ServerError) -> ServerError {
    match err {
        ServerError::Validation(msg) => ServerError::Config(msg),
        other => other,
    }
}
