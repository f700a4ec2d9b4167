//! Entrypoint for the citygate server.

use anyhow::Result;
use citygate::config::{Config, SERVICE_NAME};
use citygate::gateway;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Frontend-facing gateway: validates a user's city submission and relays it
/// to the normalization backend, degrading to a mock response when the
/// backend is unreachable.
#[derive(Debug, Parser)]
#[command(name = "citygate", version)]
struct Cli {
    /// Path to the TOML config file (default: the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.listen_host = host;
    }
    if let Some(port) = cli.port {
        config.listen_port = port;
    }

    tracing::info!(
        "Starting {SERVICE_NAME} (upstream: {})",
        config.upstream_base_url
    );

    gateway::serve(Arc::new(config)).await
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "citygate=debug,info"
    } else {
        "citygate=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}
