//! Reconciliation Engine
//!
//! Recomputes roll location two ways and diffs the results:
//! 1. Log-derived: latest transaction per roll, counted per location
//! 2. Field-derived: `Roll.current_location`, counted per location
//! 3. Diff over the union of location codes
//! 4. Persist an audit record; alert operators on mismatch

use crate::domain::errors::ReconcileError;
use crate::domain::report::{Mismatch, ReconciliationReport};
use crate::ports::outbound::AlertSink;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use wt_01_entity_store::{StoreError, WarehouseStore};

pub struct ReconciliationEngine {
    store: Arc<dyn WarehouseStore>,
    alerts: Arc<dyn AlertSink>,
    alert_subject: String,
    running: AtomicBool,
}

impl ReconciliationEngine {
    pub fn new(
        store: Arc<dyn WarehouseStore>,
        alerts: Arc<dyn AlertSink>,
        alert_subject: impl Into<String>,
    ) -> Self {
        Self {
            store,
            alerts,
            alert_subject: alert_subject.into(),
            running: AtomicBool::new(false),
        }
    }

    /// Run one reconciliation pass.
    ///
    /// Overlapping runs are refused: a second caller gets `AlreadyRunning`
    /// instead of reading a half-updated snapshot and reporting false drift.
    pub async fn run_once(&self) -> Result<ReconciliationReport, ReconcileError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ReconcileError::AlreadyRunning);
        }
        let result = self.reconcile().await;
        self.running.store(false, Ordering::SeqCst);
        result
    }

    async fn reconcile(&self) -> Result<ReconciliationReport, ReconcileError> {
        let mismatches = self.diff_projections()?;

        let record = self
            .store
            .record_reconciliation(mismatches.is_empty(), &join_lines(&mismatches))?;

        if mismatches.is_empty() {
            info!("[wt-05] ✅ All location counts match");
        } else {
            let body = format!("Discrepancies:\n{}", join_lines(&mismatches));
            warn!(
                mismatch_count = mismatches.len(),
                "[wt-05] Roll-count drift detected"
            );
            // Detection must survive a dead mail server.
            if let Err(e) = self.alerts.notify(&self.alert_subject, &body).await {
                warn!(error = %e, "[wt-05] Mismatch alert could not be delivered");
            }
        }

        Ok(ReconciliationReport {
            run_at_ms: record.run_at_ms,
            mismatches,
        })
    }

    /// Build both projections and return the locations where they disagree,
    /// in location-code order.
    fn diff_projections(&self) -> Result<Vec<Mismatch>, StoreError> {
        // Log-derived counts: latest transaction per roll, keyed by the
        // location it references. Every known location starts at zero.
        let mut dashboard: BTreeMap<String, u64> = self
            .store
            .locations()?
            .into_iter()
            .map(|loc| (loc.location_code, 0))
            .collect();
        for tx in self.store.latest_per_roll()? {
            if let Some(loc_id) = tx.location_id {
                if let Some(location) = self.store.location(loc_id)? {
                    *dashboard.entry(location.location_code).or_insert(0) += 1;
                }
            }
        }

        // Field-derived counts from the denormalized cache.
        let mut api: BTreeMap<String, u64> = BTreeMap::new();
        for roll in self.store.rolls()? {
            if let Some(code) = roll.current_location {
                *api.entry(code).or_insert(0) += 1;
            }
        }

        // Union of codes; a code missing on one side counts as zero there.
        let mut codes: Vec<String> = dashboard.keys().cloned().collect();
        codes.extend(api.keys().cloned());
        codes.sort();
        codes.dedup();

        Ok(codes
            .into_iter()
            .filter_map(|code| {
                let log_count = dashboard.get(&code).copied().unwrap_or(0);
                let field_count = api.get(&code).copied().unwrap_or(0);
                (log_count != field_count).then_some(Mismatch {
                    location_code: code,
                    log_count,
                    field_count,
                })
            })
            .collect())
    }
}

fn join_lines(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(Mismatch::line)
        .collect::<Vec<_>>()
        .join("\n")
}
