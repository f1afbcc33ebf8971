//! Gateway Service
//!
//! One authenticated facade over the recorder, scoper, reconciliation
//! engine, and intake pipeline. Callers are UI/API layers; inputs and
//! outputs are domain types only.

use crate::domain::errors::ApiError;
use crate::domain::views::{DashboardSummary, RollDetails, SearchQuery, STATUS_PENDING};
use shared_types::{AuthPrincipal, Role, Roll, RollId, Transaction, TxAction};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};
use wt_01_entity_store::{StoreError, WarehouseStore};
use wt_03_transaction_recorder::{RecordOutcome, RecordRequest, TransactionRecorderApi};
use wt_04_visibility::{AccessScope, VisibilityScoper};
use wt_05_reconciliation::{ReconciliationEngine, ReconciliationReport};
use wt_06_intake::{ImportSummary, IntakeRow, IntakeService, PrintJobId, QrCodeGenerator};

pub struct GatewayService {
    store: Arc<dyn WarehouseStore>,
    recorder: Arc<dyn TransactionRecorderApi>,
    scoper: Arc<VisibilityScoper>,
    engine: Arc<ReconciliationEngine>,
    intake: Arc<IntakeService>,
    qr: Arc<dyn QrCodeGenerator>,
}

impl GatewayService {
    pub fn new(
        store: Arc<dyn WarehouseStore>,
        recorder: Arc<dyn TransactionRecorderApi>,
        scoper: Arc<VisibilityScoper>,
        engine: Arc<ReconciliationEngine>,
        intake: Arc<IntakeService>,
        qr: Arc<dyn QrCodeGenerator>,
    ) -> Self {
        Self {
            store,
            recorder,
            scoper,
            engine,
            intake,
            qr,
        }
    }

    /// Record a movement for a roll.
    ///
    /// The acting username always comes from the authenticated principal,
    /// never from the request body. QA_SCAN honors the site-wide toggle.
    pub async fn create_transaction(
        &self,
        principal: &AuthPrincipal,
        mut request: RecordRequest,
    ) -> Result<RecordOutcome, ApiError> {
        if request.action == TxAction::QaScan && !self.store.site_config()?.enable_qa_scan {
            return Err(ApiError::QaScanDisabled);
        }
        request.user = principal.username.clone();
        Ok(self.recorder.record(request).await?)
    }

    /// Single-roll view behind the QR short link.
    ///
    /// This is the universal scan surface: any authenticated principal who
    /// holds a roll's label may look that roll up, so no department veto
    /// applies here (list queries are scoped instead).
    pub fn roll_details(&self, roll_id: RollId) -> Result<RollDetails, ApiError> {
        let roll = self
            .store
            .roll(roll_id)?
            .ok_or(ApiError::RollNotFound(roll_id))?;
        self.build_details(&roll)
    }

    /// A roll's movement history, newest first.
    pub fn roll_history(&self, roll_id: RollId) -> Result<Vec<Transaction>, ApiError> {
        if self.store.roll(roll_id)?.is_none() {
            return Err(ApiError::RollNotFound(roll_id));
        }
        let mut history = self.store.transactions_for_roll(roll_id)?;
        history.sort_by_key(|tx| std::cmp::Reverse(tx.order_key()));
        Ok(history)
    }

    /// Rolls currently at a rack, per the denormalized cache.
    ///
    /// The location must exist and lie within the caller's scope; existence
    /// is admitted before access is refused.
    pub fn rolls_at_location(
        &self,
        principal: &AuthPrincipal,
        location_code: &str,
    ) -> Result<Vec<RollDetails>, ApiError> {
        let location = self
            .store
            .location_by_code(location_code)?
            .ok_or_else(|| ApiError::LocationNotFound(location_code.to_owned()))?;

        let scope = self.scoper.scope_for(principal)?;
        if !scope.allows_location_code(&location.location_code) {
            return Err(ApiError::denied(
                &principal.username,
                format!("location {location_code}"),
            ));
        }

        self.store
            .rolls_at_location(&location.location_code)?
            .iter()
            .map(|roll| self.build_details(roll))
            .collect()
    }

    /// Scoped roll search for the print/search screen.
    pub fn search_rolls(
        &self,
        principal: &AuthPrincipal,
        query: &SearchQuery,
    ) -> Result<Vec<RollDetails>, ApiError> {
        let scope = self.scoper.scope_for(principal)?;
        if scope.is_denied() {
            return Err(ApiError::denied(&principal.username, "roll search"));
        }
        let dept_filter =
            self.scoper
                .resolve_department_filter(principal, &scope, query.department.as_deref())?;

        let visible = self.scoper.scope_rolls(&scope, self.store.rolls()?)?;
        let needle = query.text.as_deref().map(str::to_lowercase);

        let mut matched: Vec<(u64, RollDetails)> = Vec::new();
        for roll in visible {
            let Some(batch) = self.store.batch(roll.batch_id)? else {
                continue;
            };
            let Some(material) = self.store.material(batch.material_id)? else {
                continue;
            };
            if let Some(dept) = &dept_filter {
                let code = self.store.department(material.department_id)?.map(|d| d.code);
                if code.as_deref() != Some(dept.as_str()) {
                    continue;
                }
            }
            if let Some(from) = query.date_from_ms {
                if batch.created_at_ms < from {
                    continue;
                }
            }
            if let Some(to) = query.date_to_ms {
                if batch.created_at_ms > to {
                    continue;
                }
            }
            if let Some(needle) = &needle {
                let haystack = [
                    material.material_number.to_lowercase(),
                    batch.batch_number.to_lowercase(),
                    material.description.to_lowercase(),
                ];
                if !haystack.iter().any(|field| field.contains(needle)) {
                    continue;
                }
            }
            matched.push((batch.created_at_ms, self.build_details(&roll)?));
        }

        // Newest batches first.
        matched.sort_by_key(|(created_at_ms, _)| std::cmp::Reverse(*created_at_ms));
        Ok(matched.into_iter().map(|(_, details)| details).collect())
    }

    /// Summary cards for the manager dashboard.
    ///
    /// Factory Admins (and superusers) may pick any department; everyone
    /// else is locked to their own.
    pub fn dashboard(
        &self,
        principal: &AuthPrincipal,
        department: Option<&str>,
    ) -> Result<DashboardSummary, ApiError> {
        let allowed = principal.is_superuser
            || matches!(
                principal.role,
                Some(Role::FactoryAdmin | Role::PlantManager | Role::StockKeeper)
            );
        if !allowed {
            return Err(ApiError::denied(&principal.username, "dashboard"));
        }

        let scope = self.scoper.scope_for(principal)?;
        if scope.is_denied() {
            return Err(ApiError::denied(&principal.username, "dashboard"));
        }
        let selected = match self
            .scoper
            .resolve_department_filter(principal, &scope, department)?
        {
            Some(dept) => Some(dept),
            None if matches!(scope, AccessScope::Unrestricted) => None,
            None => self.home_department(principal)?,
        };

        // Produced: rolls whose material was registered by the department.
        let mut produced = 0u64;
        for roll in self.store.rolls()? {
            match (&selected, self.scoper.roll_department_code(&roll)?) {
                (None, _) => produced += 1,
                (Some(dept), Some(code)) if code == *dept => produced += 1,
                _ => {}
            }
        }

        // Stored: distinct rolls ever put away into the department's racks.
        let mut stored: BTreeSet<RollId> = BTreeSet::new();
        // Dispatched: distinct rolls dispatched by the department's users.
        let mut dispatched: BTreeSet<RollId> = BTreeSet::new();
        for tx in self.store.all_transactions()? {
            match tx.action {
                TxAction::Putaway => {
                    let in_scope = match (&selected, tx.location_id) {
                        (None, _) => true,
                        (Some(dept), Some(loc_id)) => self
                            .store
                            .location(loc_id)?
                            .map(|l| l.location_code.starts_with(dept.as_str()))
                            .unwrap_or(false),
                        (Some(_), None) => false,
                    };
                    if in_scope {
                        stored.insert(tx.roll_id);
                    }
                }
                TxAction::Dispatch => {
                    let in_scope = match &selected {
                        None => true,
                        Some(dept) => self.user_department(&tx.user)?.as_deref() == Some(dept),
                    };
                    if in_scope {
                        dispatched.insert(tx.roll_id);
                    }
                }
                _ => {}
            }
        }

        let (stored, dispatched) = (stored.len() as u64, dispatched.len() as u64);
        let last_reconciliation = self.store.latest_reconciliation()?;
        let mismatch_count = last_reconciliation
            .as_ref()
            .filter(|r| !r.is_clean)
            .map(|r| r.mismatches.lines().count() as u64)
            .unwrap_or(0);

        debug!(
            department = selected.as_deref(),
            produced, stored, dispatched, "[wt-07] Dashboard computed"
        );
        Ok(DashboardSummary {
            department: selected,
            produced,
            stored,
            dispatched,
            pending_storage: produced as i64 - stored as i64,
            pending_dispatch: stored as i64 - dispatched as i64,
            last_reconciliation,
            mismatch_count,
        })
    }

    /// Run reconciliation now. Restricted to unrestricted principals.
    pub async fn trigger_reconciliation(
        &self,
        principal: &AuthPrincipal,
    ) -> Result<ReconciliationReport, ApiError> {
        if self.scoper.scope_for(principal)? != AccessScope::Unrestricted {
            return Err(ApiError::denied(&principal.username, "reconciliation"));
        }
        info!(username = %principal.username, "[wt-07] Manual reconciliation triggered");
        Ok(self.engine.run_once().await?)
    }

    /// Latest reconciliation record, for the dashboard banner.
    pub fn latest_reconciliation(
        &self,
        principal: &AuthPrincipal,
    ) -> Result<Option<shared_types::ReconciliationRecord>, ApiError> {
        let allowed = principal.is_superuser
            || matches!(
                principal.role,
                Some(Role::FactoryAdmin | Role::PlantManager | Role::StockKeeper)
            );
        if !allowed {
            return Err(ApiError::denied(&principal.username, "reconciliation log"));
        }
        Ok(self.store.latest_reconciliation()?)
    }

    /// Bulk import of parsed spreadsheet rows.
    pub async fn import(
        &self,
        principal: &AuthPrincipal,
        rows: Vec<IntakeRow>,
    ) -> Result<ImportSummary, ApiError> {
        Ok(self.intake.import(principal, rows).await?)
    }

    /// Submit a label print job for a roll's QR label.
    pub async fn print_label(&self, roll_id: RollId) -> Result<PrintJobId, ApiError> {
        Ok(self.intake.print_label(roll_id).await?)
    }

    fn home_department(&self, principal: &AuthPrincipal) -> Result<Option<String>, ApiError> {
        let Some(profile) = self.store.profile(&principal.username)? else {
            return Ok(None);
        };
        let Some(dept_id) = profile.department_id else {
            return Ok(None);
        };
        Ok(self.store.department(dept_id)?.map(|d| d.code))
    }

    fn user_department(&self, username: &str) -> Result<Option<String>, StoreError> {
        let Some(profile) = self.store.profile(username)? else {
            return Ok(None);
        };
        let Some(dept_id) = profile.department_id else {
            return Ok(None);
        };
        Ok(self.store.department(dept_id)?.map(|d| d.code))
    }

    /// Assemble the derived roll view from the log tail.
    fn build_details(&self, roll: &Roll) -> Result<RollDetails, ApiError> {
        let batch = self
            .store
            .batch(roll.batch_id)?
            .ok_or_else(|| StoreError::not_found("batch", roll.batch_id))?;
        let material = self
            .store
            .material(batch.material_id)?
            .ok_or_else(|| StoreError::not_found("material", batch.material_id))?;

        let history = self.store.transactions_for_roll(roll.roll_id)?;
        let last = history.iter().max_by_key(|tx| tx.order_key());

        let status = match last {
            Some(tx) if tx.action == TxAction::Dispatch => match tx.customer_id {
                Some(cust_id) => match self.store.customer(cust_id)? {
                    Some(customer) => format!("Dispatched to {}", customer.name),
                    None => STATUS_PENDING.to_owned(),
                },
                None => STATUS_PENDING.to_owned(),
            },
            Some(tx) if tx.action.places_roll() => match tx.location_id {
                Some(loc_id) => match self.store.location(loc_id)? {
                    Some(location) => format!("In stock at {}", location.location_code),
                    None => STATUS_PENDING.to_owned(),
                },
                None => STATUS_PENDING.to_owned(),
            },
            _ => STATUS_PENDING.to_owned(),
        };

        let last_dispatch = history
            .iter()
            .filter(|tx| tx.action == TxAction::Dispatch)
            .max_by_key(|tx| tx.order_key());
        let dispatch_customer = match last_dispatch.and_then(|tx| tx.customer_id) {
            Some(cust_id) => self.store.customer(cust_id)?.map(|c| c.name),
            None => None,
        };

        Ok(RollDetails {
            roll_id: roll.roll_id,
            material_number: material.material_number,
            description: material.description,
            batch_number: batch.batch_number,
            weight_kg: roll.weight_kg,
            current_location: roll.current_location.clone(),
            status,
            posting_date_ms: last.map(|tx| tx.scanned_at_ms),
            dispatch_customer,
            qr_link: self.qr.link(roll.roll_id),
            qr_image_url: self.qr.image_url(roll.roll_id),
        })
    }
}
