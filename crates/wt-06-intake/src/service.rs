//! Intake Service
//!
//! The import pipeline:
//! 1. Permission check: every row's department must be in the caller's scope
//! 2. Get-or-create material (department + creator stamped on first sight)
//! 3. Get-or-create batch — an existing (material, batch) pair skips the row
//! 4. Create the roll and request its QR image
//! 5. Persist an import audit record

use crate::domain::errors::IntakeError;
use crate::domain::rows::{ImportSummary, IntakeRow, SkippedRow};
use crate::ports::outbound::{LabelRequest, PrintJobId, PrinterGateway, QrCodeGenerator};
use shared_types::{AuthPrincipal, RollId};
use std::sync::Arc;
use tracing::{info, warn};
use wt_01_entity_store::WarehouseStore;
use wt_04_visibility::VisibilityScoper;

/// Customer attached to rolls created by import, until a dispatch names one.
const UNKNOWN_CUSTOMER: &str = "Unknown";

pub struct IntakeService {
    store: Arc<dyn WarehouseStore>,
    scoper: Arc<VisibilityScoper>,
    qr: Arc<dyn QrCodeGenerator>,
    printer: Arc<dyn PrinterGateway>,
}

impl IntakeService {
    pub fn new(
        store: Arc<dyn WarehouseStore>,
        scoper: Arc<VisibilityScoper>,
        qr: Arc<dyn QrCodeGenerator>,
        printer: Arc<dyn PrinterGateway>,
    ) -> Self {
        Self {
            store,
            scoper,
            qr,
            printer,
        }
    }

    /// Import a sequence of rows as one run.
    ///
    /// Duplicate (material, batch) rows are skipped and reported in the
    /// summary; a department permission failure aborts the whole run before
    /// any write.
    pub async fn import(
        &self,
        principal: &AuthPrincipal,
        rows: Vec<IntakeRow>,
    ) -> Result<ImportSummary, IntakeError> {
        let scope = self.scoper.scope_for(principal)?;
        for row in &rows {
            self.scoper
                .check_department(principal, &scope, &row.department_code)?;
        }

        let total_rows = rows.len() as u64;
        let mut imported: Vec<RollId> = Vec::new();
        let mut skipped: Vec<SkippedRow> = Vec::new();

        for row in rows {
            let dept = self
                .store
                .department_by_code(&row.department_code)?
                .ok_or_else(|| IntakeError::UnknownDepartment(row.department_code.clone()))?;

            let (material, _) = self.store.get_or_create_material(
                &row.material_number,
                &row.description,
                dept.id,
                Some(&principal.username),
            )?;

            let (batch, was_new) = self
                .store
                .get_or_create_batch(material.id, &row.batch_number)?;
            if !was_new {
                skipped.push(SkippedRow {
                    material_number: row.material_number,
                    batch_number: row.batch_number,
                });
                continue;
            }

            let (customer, _) = self.store.get_or_create_customer(UNKNOWN_CUSTOMER)?;
            let roll = self
                .store
                .create_roll(batch.id, row.weight_kg, Some(customer.id))?;

            // The roll identity is already committed; a broken image
            // renderer is an operator problem, not an import failure.
            if let Err(e) = self.qr.generate(roll.roll_id).await {
                warn!(roll_id = %roll.roll_id, error = %e, "[wt-06] QR generation failed");
            }
            imported.push(roll.roll_id);
        }

        let summary = ImportSummary {
            total_rows,
            imported,
            skipped,
        };
        self.store.record_import(
            summary.total_rows,
            summary.imported_count(),
            summary.skipped_count(),
            &summary.details(),
        )?;
        info!(
            total = summary.total_rows,
            imported = summary.imported_count(),
            skipped = summary.skipped_count(),
            "[wt-06] Import run complete"
        );
        Ok(summary)
    }

    /// Manual single-roll entry: one row through the same pipeline.
    pub async fn intake_one(
        &self,
        principal: &AuthPrincipal,
        row: IntakeRow,
    ) -> Result<ImportSummary, IntakeError> {
        self.import(principal, vec![row]).await
    }

    /// Submit a label print job for an existing roll.
    pub async fn print_label(&self, roll_id: RollId) -> Result<PrintJobId, IntakeError> {
        let roll = self
            .store
            .roll(roll_id)?
            .ok_or(IntakeError::RollNotFound(roll_id))?;
        let description = self
            .store
            .batch(roll.batch_id)?
            .and_then(|batch| self.store.material(batch.material_id).transpose())
            .transpose()?
            .map(|material| material.description)
            .unwrap_or_default();

        let job_id = self
            .printer
            .print_label(&LabelRequest {
                qr_link: self.qr.link(roll_id),
                description,
            })
            .await?;
        info!(roll_id = %roll_id, job_id, "[wt-06] Label sent to printer");
        Ok(job_id)
    }
}
