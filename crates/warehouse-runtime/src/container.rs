//! # Subsystem Container
//!
//! Builds every subsystem against one shared store and hands out the wired
//! services. Initialization order follows the dependency levels: store first,
//! then scoper/recorder, then the engine and intake, then the gateway.

use crate::config::RuntimeConfig;
use std::sync::Arc;
use tracing::info;
use wt_01_entity_store::{InMemoryWarehouseDb, StoreError, WarehouseStore};
use wt_03_transaction_recorder::RecorderService;
use wt_04_visibility::VisibilityScoper;
use wt_05_reconciliation::{ReconciliationEngine, TracingAlertSink};
use wt_06_intake::{DisabledPrinterGateway, IntakeService, SiteUrlQrGenerator};
use wt_07_api_gateway::GatewayService;

/// All initialized services for one process.
pub struct WarehouseContainer {
    pub config: RuntimeConfig,
    pub store: Arc<dyn WarehouseStore>,
    pub scoper: Arc<VisibilityScoper>,
    pub recorder: Arc<RecorderService>,
    pub engine: Arc<ReconciliationEngine>,
    pub intake: Arc<IntakeService>,
    /// The surface handed to transport adapters (HTTP, CLI, ...).
    pub gateway: Arc<GatewayService>,
}

impl WarehouseContainer {
    pub fn new(config: RuntimeConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn WarehouseStore> = match &config.data_file {
            Some(path) => {
                info!(path = %path.display(), "[runtime] Opening file-backed store");
                Arc::new(InMemoryWarehouseDb::open(path)?)
            }
            None => {
                info!("[runtime] Using volatile in-memory store");
                Arc::new(InMemoryWarehouseDb::new())
            }
        };

        let scoper = Arc::new(VisibilityScoper::new(store.clone()));
        let recorder = Arc::new(RecorderService::new(store.clone()));
        let engine = Arc::new(ReconciliationEngine::new(
            store.clone(),
            Arc::new(TracingAlertSink),
            config.reconciliation.alert_subject.clone(),
        ));
        let qr = Arc::new(SiteUrlQrGenerator::new(config.site_url.clone()));
        let intake = Arc::new(IntakeService::new(
            store.clone(),
            scoper.clone(),
            qr.clone(),
            Arc::new(DisabledPrinterGateway),
        ));
        let gateway = Arc::new(GatewayService::new(
            store.clone(),
            recorder.clone(),
            scoper.clone(),
            engine.clone(),
            intake.clone(),
            qr,
        ));

        Ok(Self {
            config,
            store,
            scoper,
            recorder,
            engine,
            intake,
            gateway,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{AuthPrincipal, Role, TxAction};
    use wt_01_entity_store::CatalogStore;
    use wt_03_transaction_recorder::RecordRequest;
    use wt_06_intake::IntakeRow;

    #[tokio::test]
    async fn test_container_wires_an_end_to_end_flow() {
        let container = WarehouseContainer::new(RuntimeConfig::default()).unwrap();
        let admin = AuthPrincipal::new("admin", Some(Role::FactoryAdmin));

        container.store.create_department("FM", "Film").unwrap();
        let fm = container.store.department_by_code("FM").unwrap().unwrap();
        container
            .store
            .create_location("FMA01", Some(fm.id), "A", "01", shared_types::LocationKind::Storage)
            .unwrap();

        let summary = container
            .gateway
            .import(
                &admin,
                vec![IntakeRow {
                    material_number: "MAT-1".into(),
                    description: "Clear film".into(),
                    batch_number: "B-1".into(),
                    weight_kg: 20.0,
                    posting_date: None,
                    location_code: Some("FMA01".into()),
                    department_code: "FM".into(),
                }],
            )
            .await
            .unwrap();
        let roll_id = summary.imported[0];

        container
            .gateway
            .create_transaction(
                &admin,
                RecordRequest::new(roll_id, TxAction::Putaway, "admin").at_location("FMA01"),
            )
            .await
            .unwrap();

        let report = container.gateway.trigger_reconciliation(&admin).await.unwrap();
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_file_backed_store_survives_a_container_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig {
            data_file: Some(dir.path().join("warehouse.json")),
            ..Default::default()
        };

        {
            let container = WarehouseContainer::new(config.clone()).unwrap();
            container.store.create_department("FM", "Film").unwrap();
        }

        let reopened = WarehouseContainer::new(config).unwrap();
        assert!(reopened
            .store
            .department_by_code("FM")
            .unwrap()
            .is_some());
    }
}
