//! Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::AlertError;
use async_trait::async_trait;

/// Notification sink for reconciliation mismatches.
///
/// Delivery failure must never crash a reconciliation run; callers log and
/// continue.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn notify(&self, subject: &str, body: &str) -> Result<(), AlertError>;
}

/// Fallback sink that surfaces alerts in the service log.
#[derive(Default)]
pub struct TracingAlertSink;

#[async_trait]
impl AlertSink for TracingAlertSink {
    async fn notify(&self, subject: &str, body: &str) -> Result<(), AlertError> {
        tracing::error!(subject, "[wt-05] {}", body);
        Ok(())
    }
}
