//! Warehouse-Trace service entry point.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use warehouse_runtime::{RuntimeConfig, WarehouseRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to initialize tracing")?;

    let config = RuntimeConfig::load_from_env().context("failed to load configuration")?;
    let runtime = WarehouseRuntime::new(config)?;
    let scheduler = runtime.start();

    info!("[runtime] Ready");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    runtime.shutdown();
    scheduler.await.ok();
    info!("[runtime] Stopped");
    Ok(())
}
