//! # WT-06: Intake Subsystem
//!
//! Brings new rolls into the system: bulk import of parsed spreadsheet rows
//! and single-roll manual entry, both subject to the batch-uniqueness
//! invariant (duplicate rows are skipped and logged, never fatal), plus the
//! QR-link and label-printer external boundaries.
//!
//! ## Architecture
//!
//! - **Domain**: `IntakeRow`, `ImportSummary`, `IntakeError`
//! - **Ports**: Outbound `QrCodeGenerator`, `PrinterGateway`
//! - **Adapters**: deterministic site-URL QR links, disabled printer stub
//! - **Service**: import pipeline with department permission check

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::printer::DisabledPrinterGateway;
pub use adapters::qr::SiteUrlQrGenerator;
pub use domain::errors::{IntakeError, PrintError, QrError};
pub use domain::rows::{ImportSummary, IntakeRow, SkippedRow};
pub use ports::outbound::{LabelRequest, PrintJobId, PrinterGateway, QrCodeGenerator};
pub use service::IntakeService;
