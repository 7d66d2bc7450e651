//! Estimate Engine HTTP server - CLI entry point

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use estimate_engine::api::{create_router, AppState};
use estimate_engine::config::ConfigLoader;

/// Construction estimate engine server
#[derive(Parser, Debug)]
#[command(name = "estimate-engine")]
#[command(version, about = "Serves construction estimate totals over HTTP", long_about = None)]
struct Args {
    /// Directory holding estimator.yaml, rates.yaml and sales_tax.yaml
    #[arg(short, long, env = "ESTIMATE_CONFIG", default_value = "./config/default")]
    config: PathBuf,

    /// Address to bind
    #[arg(long, env = "ESTIMATE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "ESTIMATE_PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::load(&args.config)?;
    info!(
        config = %args.config.display(),
        trades = config.rate_table().trades().count(),
        "Loaded estimator configuration"
    );

    let router = create_router(AppState::new(config));
    let address = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, version = env!("CARGO_PKG_VERSION"), "Estimate engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
