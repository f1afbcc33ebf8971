//! Shared test harness: every subsystem wired against one in-memory store
//! with a manually advanced clock.

use async_trait::async_trait;
use shared_types::{AuthPrincipal, LocationKind, Profile, Role, RollId};
use std::sync::{Arc, Mutex};
use wt_01_entity_store::{
    CatalogStore, InMemoryWarehouseDb, ManualTimeSource, ProfileStore, RollStore,
};
use wt_03_transaction_recorder::RecorderService;
use wt_04_visibility::VisibilityScoper;
use wt_05_reconciliation::{AlertError, AlertSink, ReconciliationEngine};
use wt_06_intake::{DisabledPrinterGateway, IntakeService, SiteUrlQrGenerator};
use wt_07_api_gateway::GatewayService;

/// Alert sink that keeps everything it was asked to deliver.
#[derive(Default)]
pub struct RecordingAlertSink {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn notify(&self, subject: &str, body: &str) -> Result<(), AlertError> {
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_owned(), body.to_owned()));
        Ok(())
    }
}

/// The full stack against one store.
pub struct Harness {
    pub db: Arc<InMemoryWarehouseDb>,
    pub clock: Arc<ManualTimeSource>,
    pub recorder: Arc<RecorderService>,
    pub scoper: Arc<VisibilityScoper>,
    pub engine: Arc<ReconciliationEngine>,
    pub alerts: Arc<RecordingAlertSink>,
    pub intake: Arc<IntakeService>,
    pub gateway: Arc<GatewayService>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(ManualTimeSource::new(1_700_000_000_000));
        let db = Arc::new(InMemoryWarehouseDb::with_time(clock.clone()));
        let scoper = Arc::new(VisibilityScoper::new(db.clone()));
        let recorder = Arc::new(RecorderService::new(db.clone()));
        let alerts = Arc::new(RecordingAlertSink::default());
        let engine = Arc::new(ReconciliationEngine::new(
            db.clone(),
            alerts.clone(),
            "Warehouse roll-count mismatch",
        ));
        let qr = Arc::new(SiteUrlQrGenerator::new("http://wms.test"));
        let intake = Arc::new(IntakeService::new(
            db.clone(),
            scoper.clone(),
            qr.clone(),
            Arc::new(DisabledPrinterGateway),
        ));
        let gateway = Arc::new(GatewayService::new(
            db.clone(),
            recorder.clone(),
            scoper.clone(),
            engine.clone(),
            intake.clone(),
            qr,
        ));
        Self {
            db,
            clock,
            recorder,
            scoper,
            engine,
            alerts,
            intake,
            gateway,
        }
    }

    /// Department + one material/batch/roll in it; returns the roll id.
    pub fn seed_roll(&self, dept: &str, material_number: &str, batch_number: &str) -> RollId {
        let dept_id = match self.db.department_by_code(dept).unwrap() {
            Some(d) => d.id,
            None => self.db.create_department(dept, dept).unwrap().id,
        };
        let (material, _) = self
            .db
            .get_or_create_material(material_number, "test material", dept_id, None)
            .unwrap();
        let (batch, _) = self
            .db
            .get_or_create_batch(material.id, batch_number)
            .unwrap();
        self.db.create_roll(batch.id, 75.0, None).unwrap().roll_id
    }

    /// Storage rack whose first two letters name the owning department.
    pub fn seed_location(&self, code: &str) {
        let dept_id = self
            .db
            .department_by_code(&code[..2])
            .unwrap()
            .map(|d| d.id);
        self.db
            .create_location(code, dept_id, &code[2..3], &code[3..], LocationKind::Storage)
            .unwrap();
    }

    /// A principal with a saved profile in the given department.
    pub fn principal(&self, username: &str, role: Role, dept: &str, extra: &str) -> AuthPrincipal {
        let dept_id = match self.db.department_by_code(dept).unwrap() {
            Some(d) => d.id,
            None => self.db.create_department(dept, dept).unwrap().id,
        };
        self.db
            .save_profile(Profile {
                username: username.into(),
                department_id: Some(dept_id),
                extra_access: extra.into(),
                role,
                needs_approval: false,
            })
            .unwrap();
        AuthPrincipal::new(username, Some(role))
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
