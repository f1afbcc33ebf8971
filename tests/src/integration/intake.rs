//! # Intake Flow
//!
//! Bulk import through the gateway: batch uniqueness across runs, audit
//! records, and the imported rolls entering the normal lifecycle.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use shared_types::{AuthPrincipal, Role, TxAction};
    use wt_01_entity_store::{AuditStore, CatalogStore};
    use wt_03_transaction_recorder::RecordRequest;
    use wt_06_intake::IntakeRow;

    fn row(material: &str, batch: &str, dept: &str) -> IntakeRow {
        IntakeRow {
            material_number: material.into(),
            description: format!("{material} stock"),
            batch_number: batch.into(),
            weight_kg: 18.5,
            posting_date: Some("2025-07-23".into()),
            location_code: Some(format!("{dept}A01")),
            department_code: dept.into(),
        }
    }

    #[tokio::test]
    async fn test_reimported_batches_skip_without_overwriting() {
        let harness = Harness::new();
        harness.seed_location("FMA01");
        harness.db.create_department("FM", "Film").ok();
        let admin = AuthPrincipal::new("admin", Some(Role::FactoryAdmin));

        let first = harness
            .gateway
            .import(&admin, vec![row("MAT-1", "B-1", "FM"), row("MAT-1", "B-2", "FM")])
            .await
            .unwrap();
        assert_eq!(first.imported_count(), 2);

        // Same spreadsheet uploaded again, plus one genuinely new row.
        let second = harness
            .gateway
            .import(
                &admin,
                vec![
                    row("MAT-1", "B-1", "FM"),
                    row("MAT-1", "B-2", "FM"),
                    row("MAT-1", "B-3", "FM"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(second.imported_count(), 1);
        assert_eq!(second.skipped_count(), 2);
        assert_eq!(second.details(), "MAT-1|B-1\nMAT-1|B-2");

        // The original batch rows survived untouched: still exactly one
        // batch per (material, batch_number) pair.
        let material = harness.db.material_by_number("MAT-1").unwrap().unwrap();
        let (b1, created) = harness.db.get_or_create_batch(material.id, "B-1").unwrap();
        assert!(!created);
        assert!(b1.id > 0);

        let records = harness.db.import_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].total_rows, 3);
        assert_eq!(records[1].imported, 1);
        assert_eq!(records[1].skipped, 2);
    }

    #[tokio::test]
    async fn test_imported_rolls_enter_the_normal_lifecycle() {
        let harness = Harness::new();
        harness.db.create_department("FM", "Film").unwrap();
        harness.seed_location("FMA01");
        let admin = AuthPrincipal::new("admin", Some(Role::FactoryAdmin));

        let summary = harness
            .gateway
            .import(&admin, vec![row("MAT-1", "B-1", "FM")])
            .await
            .unwrap();
        let roll_id = summary.imported[0];

        harness
            .gateway
            .create_transaction(
                &admin,
                RecordRequest::new(roll_id, TxAction::Putaway, "admin").at_location("FMA01"),
            )
            .await
            .unwrap();

        let details = harness.gateway.roll_details(roll_id).unwrap();
        assert_eq!(details.status, "In stock at FMA01");
        assert_eq!(details.batch_number, "B-1");

        // The whole flow leaves both projections in agreement.
        let report = harness.engine.run_once().await.unwrap();
        assert!(report.is_clean());
    }
}
