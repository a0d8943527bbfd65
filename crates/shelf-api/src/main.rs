use anyhow::{Context, Result};
use clap::Parser;
use shelf_api::{telemetry, AppState, Server, ServerArgs, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    let config = ServerConfig::from_args(&args).context("Failed to load configuration")?;
    telemetry::init_tracing(&config)?;

    tracing::info!(host = %config.host, port = config.port, "Starting shelf-api");
    let state = AppState::seeded();
    Server::bind(&config, state).await?.run().await?;
    tracing::info!("Server stopped");
    Ok(())
}
