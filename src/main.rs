// file: src/main.rs
// description: commandline entry point that configures and runs the mock server
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use jqpm_server::utils::logging::{format_error, format_info, format_success};
use jqpm_server::{Config, PluginServer};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "jqpm_server")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Mock jQuery plugin registry backed by the GitHub API", long_about = None)]
struct Cli {
    /// Port to listen on (overrides configuration, default 5000)
    #[arg(value_name = "PORT")]
    port: Option<u16>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = jqpm_server::config::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    jqpm_server::utils::logging::init_logger(cli.color, cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", format_error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("jQuery plugin registry mock server");

    let mut config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using environment and defaults",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if let Some(port) = cli.port {
        config.server.port = port;
        config.validate().context("Invalid port")?;
    }

    let server = PluginServer::new(config).context("Failed to create server")?;
    let listener = server
        .bind()
        .await
        .with_context(|| format!("Failed to bind {}", server.config().listen_addr()))?;

    println!(
        "{}",
        format_success(&format!("Serving on http://{}", listener.local_addr()?))
    );
    println!("{}", format_info("Try GET /<plugin-name>, Ctrl-C to stop"));

    server.serve(listener).await.context("Server error")?;
    Ok(())
}
