//! diagnosd: Diagnos prediction daemon.
//!
//! Serves the [`Predictor`](diagnos::Predictor) over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use diagnos::server::{self, Config};

/// Diagnos daemon, the disease-risk prediction service.
#[derive(Parser)]
#[command(name = "diagnosd")]
#[command(version = diagnos::PKG_VERSION)]
#[command(about = "Diagnos prediction daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Address to bind to, overriding the config file.
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }

    let predictor = Arc::new(server::build_predictor(&config)?);
    server::preload(&predictor, &config.models.preload).await;

    // Parse address
    let addr: SocketAddr = config.server.address.parse().map_err(|e| {
        diagnos::DiagnosError::Configuration(format!("Invalid address: {e}"))
    })?;

    info!(
        version = diagnos::version_string(),
        %addr,
        manifest = %config.models.manifest_path().display(),
        fallback = predictor.has_fallback(),
        "diagnosd starting"
    );

    let listener = TcpListener::bind(addr).await?;
    server::serve(listener, predictor).await?;

    Ok(())
}
