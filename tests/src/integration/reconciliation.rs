//! # Reconciliation Flow
//!
//! Drift between the denormalized cache and the transaction log must be
//! detected, recorded, and alerted — with exact per-location counts.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use shared_types::TxAction;
    use wt_01_entity_store::{AuditStore, CatalogStore, NewTransaction, TransactionLog};
    use wt_03_transaction_recorder::{RecordRequest, TransactionRecorderApi};

    #[tokio::test]
    async fn test_consistent_store_reconciles_clean() {
        let harness = Harness::new();
        let roll_id = harness.seed_roll("FM", "MAT-1", "B-1");
        harness.seed_location("FMA01");
        harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Putaway, "op").at_location("FMA01"))
            .await
            .unwrap();

        let report = harness.engine.run_once().await.unwrap();

        assert!(report.is_clean());
        assert!(harness.db.latest_reconciliation().unwrap().unwrap().is_clean);
        assert!(harness.alerts.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_fabricated_drift_yields_one_exact_line() {
        let harness = Harness::new();
        let roll_id = harness.seed_roll("FM", "MAT-1", "B-1");
        harness.seed_location("FMA01");
        harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Putaway, "op").at_location("FMA01"))
            .await
            .unwrap();

        // Fabricate inconsistency: the location row disappears, so the log
        // no longer yields FMA01 while the roll's cache still names it.
        let loc = harness.db.location_by_code("FMA01").unwrap().unwrap();
        harness.db.delete_location(loc.id).unwrap();

        let report = harness.engine.run_once().await.unwrap();

        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.lines(), "FMA01: dashboard=0 vs api=1");

        let record = harness.db.latest_reconciliation().unwrap().unwrap();
        assert!(!record.is_clean);
        assert_eq!(record.mismatches, "FMA01: dashboard=0 vs api=1");

        let sent = harness.alerts.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Warehouse roll-count mismatch");
        assert!(sent[0].1.contains("FMA01: dashboard=0 vs api=1"));
    }

    #[tokio::test]
    async fn test_rogue_log_append_is_caught_on_both_sides() {
        let harness = Harness::new();
        let roll_id = harness.seed_roll("FM", "MAT-1", "B-1");
        harness.seed_location("FMA01");
        harness.seed_location("FMA02");
        harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Putaway, "op").at_location("FMA01"))
            .await
            .unwrap();
        harness.clock.advance(1_000);

        // A write path that bypasses the recorder: raw QA_SCAN carrying a
        // location. The cache keeps FMA01; the log's tail now says FMA02.
        let rogue = harness.db.location_by_code("FMA02").unwrap().unwrap();
        harness
            .db
            .commit(NewTransaction {
                roll_id,
                action: TxAction::QaScan,
                location_id: Some(rogue.id),
                user: "rogue".into(),
                customer_id: None,
            })
            .unwrap();

        let report = harness.engine.run_once().await.unwrap();

        assert_eq!(
            report.lines(),
            "FMA01: dashboard=0 vs api=1\nFMA02: dashboard=1 vs api=0"
        );
    }

    #[tokio::test]
    async fn test_dispatched_rolls_count_on_neither_side() {
        let harness = Harness::new();
        let roll_id = harness.seed_roll("FM", "MAT-1", "B-1");
        harness.seed_location("FMA01");
        harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Putaway, "op").at_location("FMA01"))
            .await
            .unwrap();
        harness.clock.advance(1_000);
        harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Dispatch, "driver").for_customer("Acme"))
            .await
            .unwrap();

        let report = harness.engine.run_once().await.unwrap();
        assert!(report.is_clean());
    }
}
