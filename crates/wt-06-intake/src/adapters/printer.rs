//! Printer gateway adapter.

use crate::domain::errors::PrintError;
use crate::ports::outbound::{LabelRequest, PrintJobId, PrinterGateway};
use async_trait::async_trait;

/// Stand-in for deployments without a label printer: every job is refused
/// with a clear reason, which callers surface to the operator.
#[derive(Default)]
pub struct DisabledPrinterGateway;

#[async_trait]
impl PrinterGateway for DisabledPrinterGateway {
    async fn print_label(&self, _request: &LabelRequest) -> Result<PrintJobId, PrintError> {
        Err(PrintError::Gateway("printer gateway not configured".into()))
    }
}
