//! Background scheduler for periodic reconciliation.
//!
//! One task per process. Runs are spaced by `interval_secs`; the engine's
//! own overlap guard covers the case of a run outliving the interval.

use crate::config::ReconciliationConfig;
use crate::domain::errors::ReconcileError;
use crate::engine::ReconciliationEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Spawn the reconciliation loop. The task exits when `shutdown_rx` flips to
/// `true`.
pub fn spawn_reconciliation_task(
    engine: Arc<ReconciliationEngine>,
    config: ReconciliationConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(config.interval_secs));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(
            interval_secs = config.interval_secs,
            "[wt-05] Reconciliation scheduler started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match engine.run_once().await {
                        Ok(report) if report.is_clean() => {
                            info!("[wt-05] Scheduled reconciliation clean");
                        }
                        Ok(report) => {
                            warn!(
                                mismatch_count = report.mismatches.len(),
                                "[wt-05] Scheduled reconciliation found drift"
                            );
                        }
                        Err(ReconcileError::AlreadyRunning) => {
                            warn!("[wt-05] Previous run still active, skipping tick");
                        }
                        Err(e) => {
                            error!(error = %e, "[wt-05] Reconciliation run failed");
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        info!("[wt-05] Reconciliation scheduler stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::TracingAlertSink;
    use wt_01_entity_store::InMemoryWarehouseDb;

    #[tokio::test]
    async fn test_scheduler_stops_on_shutdown_signal() {
        let db = Arc::new(InMemoryWarehouseDb::new());
        let engine = Arc::new(ReconciliationEngine::new(
            db,
            Arc::new(TracingAlertSink),
            "drift",
        ));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_reconciliation_task(
            engine,
            ReconciliationConfig {
                interval_secs: 3_600,
                ..Default::default()
            },
            shutdown_rx,
        );

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_runs_on_each_tick() {
        let db = Arc::new(InMemoryWarehouseDb::new());
        let engine = Arc::new(ReconciliationEngine::new(
            db.clone(),
            Arc::new(TracingAlertSink),
            "drift",
        ));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reconciliation_task(
            engine,
            ReconciliationConfig {
                interval_secs: 60,
                ..Default::default()
            },
            shutdown_rx,
        );

        // First tick fires immediately, then every 60s of virtual time.
        tokio::time::sleep(Duration::from_secs(125)).await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        // Empty store reconciles clean each time; three records = three ticks.
        use wt_01_entity_store::AuditStore;
        let record = db.latest_reconciliation().unwrap().unwrap();
        assert!(record.is_clean);
    }
}
