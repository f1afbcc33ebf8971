//! # Warehouse-Trace Runtime
//!
//! The service process for the warehouse roll-tracking system.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from file/env)
//! 2. Initialize the store (file-backed snapshot when configured)
//! 3. Wire subsystems: scoper, recorder, reconciliation, intake, gateway
//! 4. Start the reconciliation scheduler (one instance per process)
//! 5. Run until shutdown is signalled
//!
//! Serving HTTP, sessions, and HTML are transport concerns living outside
//! this workspace; they consume `WarehouseContainer::gateway`.

pub mod config;
pub mod container;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use wt_05_reconciliation::spawn_reconciliation_task;

pub use config::RuntimeConfig;
pub use container::WarehouseContainer;

/// The runtime orchestrating the container and background tasks.
pub struct WarehouseRuntime {
    container: Arc<WarehouseContainer>,
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl WarehouseRuntime {
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let container = Arc::new(WarehouseContainer::new(config)?);
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
        })
    }

    pub fn container(&self) -> &Arc<WarehouseContainer> {
        &self.container
    }

    /// Start background tasks and return their join handle.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        info!("===========================================");
        info!("  Warehouse-Trace Runtime v0.1.0");
        info!("  Site URL: {}", self.container.config.site_url);
        info!(
            "  Reconciliation every {}s",
            self.container.config.reconciliation.interval_secs
        );
        info!("===========================================");

        spawn_reconciliation_task(
            self.container.engine.clone(),
            self.container.config.reconciliation.clone(),
            self.shutdown_rx.clone(),
        )
    }

    /// Signal every background task to stop.
    pub fn shutdown(&self) {
        info!("[runtime] Shutdown requested");
        let _ = self.shutdown_tx.send(true);
    }
}
